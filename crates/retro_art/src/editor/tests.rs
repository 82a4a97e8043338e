//! Editor session tests driven by scripted input

use super::*;
use crate::assets::image_loader::solid_color;
use crate::assets::MemoryResolver;
use crate::catalog::GameRecord;
use crate::config::{ImageSlotConfig, LayoutConfig, TextSlotConfig};
use crate::input::ScriptedInput;
use crate::render::{DrawCommand, RecordingCanvas};
use crate::scene::SceneBuilder;
use approx::assert_relative_eq;

fn scene() -> Scene {
    let mut layout = LayoutConfig::default();
    layout.frame.width = 320;
    layout.frame.height = 240;
    layout.images.insert("back".to_string(), ImageSlotConfig::at(0, 0, 0).with_path("back.png"));
    layout.images.insert("logo".to_string(), ImageSlotConfig::at(20, 20, 1).with_path("logo.png"));
    layout.texts.insert("title".to_string(), TextSlotConfig::at(10, 200, 2).with_font_size(10));

    let resolver = MemoryResolver::new()
        .with("back.png", solid_color(320, 240, [0, 0, 0, 255]))
        .with("logo.png", solid_color(50, 50, [255, 0, 0, 255]));
    let record = GameRecord::new().with("title", "Gradius");
    SceneBuilder::new(&layout, &record, &resolver).build().unwrap()
}

fn ctrl(key: KeyCode) -> InputEvent {
    InputEvent::key_with(key, Modifiers::CTRL)
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("retro_art_editor_{}_{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_drag_keeps_cursor_offset() {
    let mut editor = Editor::new(scene());
    editor.handle_event(InputEvent::PointerPressed { x: 30, y: 25, button: MouseButton::Left });
    assert_eq!(editor.scene().selected(), "logo");
    assert_eq!(editor.dragging(), Some("logo"));

    editor.handle_event(InputEvent::PointerMoved { x: 130, y: 75 });
    assert_eq!(editor.scene().element("logo").unwrap().position, Point::new(120, 70));

    editor.handle_event(InputEvent::PointerReleased { x: 130, y: 75, button: MouseButton::Left });
    assert_eq!(editor.dragging(), None);
    editor.handle_event(InputEvent::PointerMoved { x: 0, y: 0 });
    assert_eq!(editor.scene().element("logo").unwrap().position, Point::new(120, 70));
}

#[test]
fn test_drag_to_extreme_cursor_saturates() {
    let mut editor = Editor::new(scene());
    editor.handle_event(InputEvent::PointerPressed { x: 30, y: 25, button: MouseButton::Left });
    editor.handle_event(InputEvent::PointerMoved { x: i32::MIN, y: i32::MAX });
    assert!(editor.is_running());
    assert_eq!(editor.scene().element("logo").unwrap().position, Point::new(i32::MIN, i32::MAX - 5));
}

#[test]
fn test_press_on_empty_space_keeps_selection() {
    let mut layout_scene = scene();
    layout_scene.select("logo").unwrap();
    let mut editor = Editor::new(layout_scene);
    editor.handle_event(InputEvent::PointerPressed { x: 500, y: 500, button: MouseButton::Left });
    assert_eq!(editor.scene().selected(), "logo");
    assert_eq!(editor.dragging(), None);
}

#[test]
fn test_keyboard_edits_use_settings() {
    let settings = EditorSettings::default().with_move_step(3).with_rotation_step(15);
    let mut editor = Editor::with_settings(scene(), settings);

    editor.handle_event(InputEvent::key(KeyCode::Tab));
    assert_eq!(editor.scene().selected(), "logo");

    editor.handle_event(InputEvent::key(KeyCode::Right));
    editor.handle_event(InputEvent::key(KeyCode::Down));
    assert_eq!(editor.scene().element("logo").unwrap().position, Point::new(23, 23));

    editor.handle_event(ctrl(KeyCode::Up));
    editor.handle_event(ctrl(KeyCode::Left));
    let transform = *editor.scene().element("logo").unwrap().kind.transform().unwrap();
    assert_relative_eq!(transform.scale(), 1.1);
    assert_eq!(transform.rotation, 15);

    editor.handle_event(InputEvent::key_with(KeyCode::Up, Modifiers::CTRL | Modifiers::SHIFT));
    editor.handle_event(InputEvent::key_with(KeyCode::Up, Modifiers::CTRL | Modifiers::SHIFT));
    assert_eq!(editor.scene().element("logo").unwrap().depth, 3);
    assert_eq!(editor.scene().edit_order().last().map(String::as_str), Some("logo"));
}

#[test]
fn test_precision_keys_resize_text() {
    let mut editor = Editor::new(scene());
    editor.handle_event(InputEvent::key(KeyCode::Tab));
    editor.handle_event(InputEvent::key(KeyCode::Tab));
    assert_eq!(editor.scene().selected(), "title");

    editor.handle_event(ctrl(KeyCode::Up));
    editor.handle_event(ctrl(KeyCode::Up));
    editor.handle_event(ctrl(KeyCode::Down));
    let Some(ElementKind::Text(title)) = editor.scene().element("title").map(|e| &e.kind) else {
        panic!("title should be text");
    };
    assert_eq!(title.font_size(), 11);
}

#[test]
fn test_unbound_keys_change_nothing() {
    let mut editor = Editor::new(scene());
    let before = editor.scene().to_layout();
    let selected = editor.scene().selected().to_string();

    editor.handle_event(InputEvent::key(KeyCode::S));
    editor.handle_event(InputEvent::key_with(KeyCode::Up, Modifiers::SHIFT));
    editor.handle_event(InputEvent::key_with(KeyCode::Left, Modifiers::ALT));
    editor.handle_event(InputEvent::PointerPressed { x: 30, y: 30, button: MouseButton::Right });

    assert_eq!(editor.scene().to_layout(), before);
    assert_eq!(editor.scene().selected(), selected);
    assert_eq!(editor.summary().saves, 0);
}

#[test]
fn test_run_renders_each_frame_until_quit() {
    let mut editor = Editor::new(scene());
    let mut input = ScriptedInput::new([
        InputEvent::key(KeyCode::Tab),
        InputEvent::key(KeyCode::Left),
        InputEvent::Quit,
        InputEvent::key(KeyCode::Left),
    ]);
    let mut canvas = RecordingCanvas::new(editor.scene().canvas());

    let summary = editor.run(&mut input, &mut canvas);
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.events, 3);
    assert!(!editor.is_running());
    assert_eq!(input.remaining(), 1);
    assert_eq!(editor.scene().element("logo").unwrap().position, Point::new(15, 20));

    // last frame outlines the selection
    assert!(matches!(canvas.commands().last(), Some(DrawCommand::Rect { .. })));
}

#[test]
fn test_save_writes_layout_and_image() {
    let dir = temp_dir("save");
    let target = SaveTarget::new(dir.join("layout.json"), dir.join("promo.png"));
    let mut editor = Editor::new(scene()).with_save_target(target);

    editor.handle_event(InputEvent::key(KeyCode::Tab));
    editor.handle_event(InputEvent::key(KeyCode::Right));
    editor.handle_event(ctrl(KeyCode::S));
    assert_eq!(editor.summary().saves, 1);

    let saved = LayoutConfig::load_from_file(dir.join("layout.json")).unwrap();
    assert_eq!(saved.images["logo"].x, 25);
    assert_eq!(saved, editor.scene().to_layout());

    let contents = std::fs::read_to_string(dir.join("layout.json")).unwrap();
    assert!(!contents.contains("selected"));
    assert!(!contents.contains("drag"));

    let image = crate::assets::image_loader::from_file(dir.join("promo.png")).unwrap();
    assert_eq!(image.dimensions(), (320, 240));
    // no outline around the selected logo
    assert_eq!(image.get_pixel(25, 20).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(24, 20).0, [0, 0, 0, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_failed_save_keeps_session_alive() {
    let dir = temp_dir("fail");
    let target = SaveTarget::new(dir.join("layout.ini"), dir.join("promo.png"));
    let mut editor = Editor::new(scene()).with_save_target(target);

    editor.handle_event(ctrl(KeyCode::S));
    assert!(editor.is_running());
    assert_eq!(editor.summary().failed_saves, 1);
    assert!(matches!(editor.save(), Err(EditorError::Layout(ConfigError::UnsupportedFormat(_)))));

    let mut no_target = Editor::new(scene());
    no_target.handle_event(ctrl(KeyCode::S));
    assert!(no_target.is_running());
    assert!(matches!(no_target.save(), Err(EditorError::NoSaveTarget)));

    std::fs::remove_dir_all(&dir).ok();
}
