use bellpanel_widget::{Cli, run};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), bellpanel_widget::AppError> {
    run(Cli::parse()).await
}
