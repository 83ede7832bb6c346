use errors::AppResult;
use licita_crawler::{cli, errors};

fn main() -> AppResult<()> {
    let rt =
        tokio::runtime::Runtime::new().map_err(|e| errors::AppError::IoError(e.to_string()))?;

    rt.block_on(cli::cli())
}
