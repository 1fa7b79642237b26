use std::sync::Arc;

use anyhow::Result;
use recordkit_core::Theme;
use recordkit_service::ThemeService;
use recordkit_storage::StorageBackend;

pub(crate) fn run(storage: Arc<StorageBackend>, dark: bool, light: bool, toggle: bool) -> Result<()> {
    let service = ThemeService::new(storage);
    let theme = if toggle {
        service.toggle()?
    } else if dark {
        service.set(Theme::Dark)?
    } else if light {
        service.set(Theme::Light)?
    } else {
        service.current()?
    };
    println!("{theme}");
    Ok(())
}
