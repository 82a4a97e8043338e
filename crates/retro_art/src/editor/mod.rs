//! Interactive scene editor
//!
//! A single-threaded polling loop: each frame reads every pending event from
//! an [`InputSource`], applies it to the scene, then renders. The loop only
//! ends on a quit event. A failed save is logged and the session goes on.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{Config, ConfigError, EditorSettings};
use crate::foundation::math::Point;
use crate::input::{map_key, EditCommand, InputEvent, InputSource, KeyCode, Modifiers, MouseButton};
use crate::render::{Canvas, RenderError, RenderOptions, SceneRenderer};
use crate::scene::{ElementKind, Scene, SceneError};

/// Editor errors
#[derive(Error, Debug)]
pub enum EditorError {
    /// Writing the layout document failed
    #[error("Failed to save layout: {0}")]
    Layout(#[from] ConfigError),

    /// Writing the raster failed
    #[error("Failed to save image: {0}")]
    Image(#[from] RenderError),

    /// A save was requested but no output paths were configured
    #[error("No save target configured")]
    NoSaveTarget,

    /// An edit named an element that does not exist
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Where the save action writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    /// Layout document; encoding follows the extension
    pub layout: PathBuf,
    /// Rendered raster
    pub image: PathBuf,
}

impl SaveTarget {
    /// Create a save target
    pub fn new(layout: impl Into<PathBuf>, image: impl Into<PathBuf>) -> Self {
        Self {
            layout: layout.into(),
            image: image.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Drag {
    name: String,
    offset: Point,
}

/// What a finished session did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames rendered
    pub frames: u64,
    /// Events handled
    pub events: u64,
    /// Successful saves
    pub saves: u32,
    /// Failed saves
    pub failed_saves: u32,
}

/// Editing session over one scene
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    settings: EditorSettings,
    renderer: SceneRenderer,
    save_target: Option<SaveTarget>,
    drag: Option<Drag>,
    running: bool,
    summary: SessionSummary,
}

impl Editor {
    /// Start a session with default settings
    pub fn new(scene: Scene) -> Self {
        Self::with_settings(scene, EditorSettings::default())
    }

    /// Start a session with explicit settings
    pub fn with_settings(scene: Scene, settings: EditorSettings) -> Self {
        let renderer = SceneRenderer::new(RenderOptions::from_settings(&settings));
        Self {
            scene,
            settings,
            renderer,
            save_target: None,
            drag: None,
            running: true,
            summary: SessionSummary::default(),
        }
    }

    /// Enable the save action
    pub fn with_save_target(mut self, target: SaveTarget) -> Self {
        self.save_target = Some(target);
        self
    }

    /// The scene being edited
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// End the session and take the scene back
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    /// False once a quit event was handled
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Name of the element being dragged
    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|drag| drag.name.as_str())
    }

    /// Counters so far
    pub const fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Poll, apply and render until a quit event arrives
    pub fn run(&mut self, input: &mut dyn InputSource, canvas: &mut dyn Canvas) -> SessionSummary {
        log::info!("Editor session started on '{}'", self.scene.selected());

        while self.running {
            for event in input.poll() {
                self.handle_event(event);
                if !self.running {
                    break;
                }
            }
            if !self.running {
                break;
            }
            if let Err(e) = self.renderer.render(&self.scene, canvas) {
                log::error!("Frame {} failed to render: {}", self.summary.frames, e);
            }
            self.summary.frames += 1;
        }

        log::info!(
            "Editor session ended after {} frames ({} saves, {} failed)",
            self.summary.frames,
            self.summary.saves,
            self.summary.failed_saves
        );
        self.summary
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        self.summary.events += 1;
        log::trace!("Event: {:?}", event);

        let result = match event {
            InputEvent::Quit => {
                self.running = false;
                Ok(())
            }
            InputEvent::PointerPressed { x, y, button: MouseButton::Left } => {
                self.begin_drag(Point::new(x, y));
                Ok(())
            }
            InputEvent::PointerMoved { x, y } => self.drag_to(Point::new(x, y)),
            InputEvent::PointerReleased { button: MouseButton::Left, .. } => {
                self.drag = None;
                Ok(())
            }
            InputEvent::PointerPressed { .. } | InputEvent::PointerReleased { .. } => Ok(()),
            InputEvent::KeyPressed { key, modifiers } => self.handle_key(key, modifiers),
        };

        if let Err(e) = result {
            log::warn!("Edit failed: {}", e);
        }
    }

    fn begin_drag(&mut self, cursor: Point) {
        let Some(name) = self.scene.select_at(cursor).map(str::to_string) else {
            self.drag = None;
            return;
        };
        let Some(element) = self.scene.element(&name) else {
            return;
        };
        let offset = cursor.delta_from(element.position);
        log::debug!("Dragging '{}'", name);
        self.drag = Some(Drag { name, offset });
    }

    fn drag_to(&mut self, cursor: Point) -> Result<(), EditorError> {
        let Some(drag) = &self.drag else {
            return Ok(());
        };
        let position = cursor.delta_from(drag.offset);
        self.scene.set_position(&drag.name, position)?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: Modifiers) -> Result<(), EditorError> {
        let Some(command) = map_key(key, modifiers) else {
            log::trace!("Unbound key {:?} with {:?}", key, modifiers);
            return Ok(());
        };
        self.apply(command)
    }

    /// Apply an edit command to the selection
    pub fn apply(&mut self, command: EditCommand) -> Result<(), EditorError> {
        let selected = self.scene.selected().to_string();
        let settings = &self.settings;

        match command {
            EditCommand::Move { dx, dy } => {
                self.scene
                    .move_element(
                        &selected,
                        dx.saturating_mul(settings.move_step),
                        dy.saturating_mul(settings.move_step),
                    )?;
            }
            EditCommand::SelectNext => {
                let next = self.scene.select_next();
                log::debug!("Selected '{}'", next);
            }
            EditCommand::Scale(direction) => {
                let is_text = matches!(
                    self.scene.element(&selected).map(|e| &e.kind),
                    Some(ElementKind::Text(_))
                );
                if is_text {
                    self.scene.resize_font(&selected, direction * settings.font_step)?;
                } else {
                    self.scene
                        .rescale(&selected, direction as f32 * settings.scale_step)?;
                }
            }
            EditCommand::Rotate(direction) => {
                self.scene.rotate(&selected, direction * settings.rotation_step)?;
            }
            EditCommand::Depth(delta) => self.scene.change_depth(&selected, delta)?,
            EditCommand::Save => match self.save() {
                Ok(()) => self.summary.saves += 1,
                Err(e) => {
                    self.summary.failed_saves += 1;
                    log::error!("{}", e);
                }
            },
            EditCommand::Quit => self.running = false,
        }
        Ok(())
    }

    /// Write the layout document and the outline-free raster
    pub fn save(&self) -> Result<(), EditorError> {
        let target = self.save_target.as_ref().ok_or(EditorError::NoSaveTarget)?;
        save_scene(&self.scene, &target.layout, &target.image)
    }
}

/// Flatten a scene to a layout file and export its raster
pub fn save_scene(scene: &Scene, layout_path: &Path, image_path: &Path) -> Result<(), EditorError> {
    scene.to_layout().save_to_file(layout_path)?;
    log::info!("Saved layout to {:?}", layout_path);
    SceneRenderer::export(scene, image_path)?;
    Ok(())
}
