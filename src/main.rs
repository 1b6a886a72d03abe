mod app;
mod input;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
