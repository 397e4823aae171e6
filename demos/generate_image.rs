//! Generate one image and write it to disk.
//!
//! ```bash
//! export NOVELAI_TOKEN="pst-..."
//! RUST_LOG=novelai_image=debug cargo run --example generate_image -- "1girl, lighthouse, dusk"
//! ```

use novelai_image::error::{format_summary, summarize_error};
use novelai_image::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "1girl, lighthouse, dusk, sea breeze".to_string());

    let client = NovelAiClient::from_env()?;
    let request = client
        .image()
        .set_prompt(prompt)
        .set_negative_prompt("lowres, bad anatomy")
        .set_size(832, 1216)?
        .set_steps(28)?
        .enable_smea(false);

    let warning = request.prompt_warning();
    if warning.exceeds {
        eprintln!(
            "prompt is {} characters, above the recommended {}",
            warning.length, warning.limit
        );
    }
    println!("seed: {}", request.seed());

    match request.generate().await {
        Ok(response) => {
            for (i, image) in response.images.iter().enumerate() {
                let file = format!("novelai_{i}.png");
                std::fs::write(&file, image)?;
                println!("wrote {file} ({} bytes)", image.len());
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", format_summary(&summarize_error(&err), true));
            Err(err.into())
        }
    }
}
