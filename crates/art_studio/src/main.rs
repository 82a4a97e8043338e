use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use retro_art::foundation::logging;

mod commands;

const DEFAULT_OUTPUT: &str = "promo.png";

fn record_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("game")
                .short('g')
                .long("game")
                .value_name("FILE")
                .help("Game record as a flat JSON object")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with("rom"),
        )
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .value_name("FILE")
                .help("CSV or JSON catalog to look the ROM up in")
                .value_parser(value_parser!(PathBuf))
                .requires("rom"),
        )
        .arg(
            Arg::new("rom")
                .short('r')
                .long("rom")
                .value_name("FILE")
                .help("ROM file name to look up in the catalog")
                .requires("catalog"),
        )
        .arg(
            Arg::new("layout")
                .short('l')
                .long("layout")
                .value_name("FILE")
                .help("Layout document (.json, .toml or .ron)")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("assets")
                .short('a')
                .long("assets")
                .value_name("DIR")
                .help("Extra directory to resolve image paths against (repeatable)")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("out")
                .short('o')
                .long("out")
                .value_name("PNG")
                .help("Rendered image")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT),
        )
}

fn cli() -> Command {
    Command::new("art_studio")
        .about("Composes, edits and catalogs promo art for retro game frontends")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("More log output (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            record_args(Command::new("render").about("Render a promo image from a layout and a game record"))
                .arg(
                    Arg::new("save-layout")
                        .long("save-layout")
                        .value_name("FILE")
                        .help("Also write the normalised layout here")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            record_args(Command::new("edit").about("Replay an input script through the editor"))
                .arg(
                    Arg::new("script")
                        .short('s')
                        .long("script")
                        .value_name("FILE")
                        .help("RON list of input events")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("settings")
                        .long("settings")
                        .value_name("FILE")
                        .help("Editor settings document")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Show the catalog record each ROM file matches")
                .arg(
                    Arg::new("catalog")
                        .short('c')
                        .long("catalog")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(Arg::new("roms").value_name("ROM").num_args(1..).required(true)),
        )
        .subcommand(
            Command::new("playlist")
                .about("Build a RetroArch playlist from a ROM directory")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("Playlist config document")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("catalog")
                        .short('c')
                        .long("catalog")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .default_value("playlists"),
                ),
        )
        .subcommand(
            Command::new("cores")
                .about("Write one playlist config per libretro core info file")
                .arg(
                    Arg::new("info-dir")
                        .long("info-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("config-dir")
                        .long("config-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .default_value("config"),
                ),
        )
}

fn log_level(matches: &ArgMatches) -> log::LevelFilter {
    match matches.get_count("verbose") {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Value of an argument clap guarantees (required or defaulted)
pub(crate) fn path_arg(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("Missing --{}", id))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    logging::init_with_level(log_level(&matches));

    match matches.subcommand() {
        Some(("render", sub)) => commands::render(sub),
        Some(("edit", sub)) => commands::edit(sub),
        Some(("lookup", sub)) => commands::lookup(sub),
        Some(("playlist", sub)) => commands::playlist(sub),
        Some(("cores", sub)) => commands::cores(sub),
        _ => Err(anyhow::anyhow!("Unknown command")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_record_source_rules() {
        let ok = cli().try_get_matches_from(["art_studio", "render", "-l", "a.toml", "-c", "c.csv", "-r", "smw.zip"]);
        assert!(ok.is_ok());

        let missing_rom = cli().try_get_matches_from(["art_studio", "render", "-l", "a.toml", "-c", "c.csv"]);
        assert!(missing_rom.is_err());

        let both = cli().try_get_matches_from(["art_studio", "render", "-l", "a.toml", "-g", "g.json", "-r", "x.zip", "-c", "c.csv"]);
        assert!(both.is_err());
    }

    #[test]
    fn test_verbosity() {
        let matches = cli().get_matches_from(["art_studio", "lookup", "-vv", "-c", "c.csv", "smw.zip"]);
        assert_eq!(log_level(&matches), log::LevelFilter::Trace);
    }
}
