use crate::error::Result;
use crate::settings::{save_settings, settings_path, shellexpand_path, Settings};

pub fn show(settings: &Settings) -> Result<()> {
    println!("Settings:     {}", settings_path().display());
    println!("Data file:    {}", settings.data_path().display());
    println!("Tags:         {}", settings.tags.join(", "));
    println!("Date formats: {}", settings.date_formats.join(", "));
    println!("Other limit:  {}", crate::fmt::money(settings.other_limit));
    Ok(())
}

pub fn set_file(mut settings: Settings, path: &str) -> Result<()> {
    let expanded = shellexpand_path(path);
    if !std::path::Path::new(&expanded).is_file() {
        log::warn!("{expanded} does not exist yet");
    }
    settings.data_file = expanded;
    save_settings(&settings)?;
    println!("Data file set to {}", settings.data_file);
    Ok(())
}
