use std::path::Path;
use std::process;

use log::LevelFilter;
use wikisync_tools::attributes;
use wikisync_tools::constants::MONSTER_DATA_PATH;
use wikisync_tools::logging;

fn main() {
    if let Err(e) = logging::init_logger(LevelFilter::Warn) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    match attributes::scan_file(Path::new(MONSTER_DATA_PATH)) {
        Ok(set) => println!("{}", set.to_list_literal()),
        Err(e) => {
            eprintln!("inspect_attributes: {}", e);
            if let Some(source) = std::error::Error::source(&e) {
                eprintln!("  caused by: {}", source);
            }
            process::exit(1);
        }
    }
}
