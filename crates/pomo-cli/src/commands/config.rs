//! `pomo config` -- print the effective settings and their file path.

use crate::settings::Settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = Settings::path()?;
    let settings = Settings::load()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&settings)?);
    Ok(())
}
