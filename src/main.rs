use color_eyre::Result;
use headless_cms_tui::{app::App, config::Config, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    info!(log = %log_path.display(), "starting headless-cms-tui");

    let config = Config::load()?;

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal).await;
    ratatui::restore();
    result
}
