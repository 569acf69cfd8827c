use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dial_client::core::constants::{API_KEY_ENV_VAR, BASE_URL_ENV_VAR, DEFAULT_BASE_URL};
use dial_client::{
    DialConfig, ImageConfiguration, ImageQuality, ImageSize, ImageStyle, ModelClient, tasks,
};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dial", about = "Upload, describe and generate images through a DIAL gateway")]
struct Cli {
    /// Gateway API key
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    api_key: String,

    /// Gateway base URL
    #[arg(long, env = BASE_URL_ENV_VAR, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload an image and ask a model to describe it
    ImageToText {
        #[arg(long)]
        image: PathBuf,

        #[arg(long, default_value = tasks::IMAGE_TO_TEXT_DEPLOYMENT)]
        deployment: String,

        #[arg(long, default_value = tasks::DEFAULT_DESCRIBE_PROMPT)]
        prompt: String,
    },
    /// Generate images from a prompt and save them locally
    TextToImage {
        #[arg(long, default_value = tasks::DEFAULT_GENERATE_PROMPT)]
        prompt: String,

        #[arg(long, default_value = tasks::TEXT_TO_IMAGE_DEPLOYMENT)]
        deployment: String,

        #[arg(long, value_enum)]
        size: Option<SizeArg>,

        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        #[arg(long, value_enum)]
        quality: Option<QualityArg>,

        /// Directory the generated images are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SizeArg {
    Square,
    Portrait,
    Landscape,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Natural,
    Vivid,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum QualityArg {
    Standard,
    Hd,
}

fn image_configuration(
    size: Option<SizeArg>,
    style: Option<StyleArg>,
    quality: Option<QualityArg>,
) -> ImageConfiguration {
    ImageConfiguration {
        size: size.map(|s| match s {
            SizeArg::Square => ImageSize::Square,
            SizeArg::Portrait => ImageSize::Portrait,
            SizeArg::Landscape => ImageSize::Landscape,
        }),
        style: style.map(|s| match s {
            StyleArg::Natural => ImageStyle::Natural,
            StyleArg::Vivid => ImageStyle::Vivid,
        }),
        quality: quality.map(|q| match q {
            QualityArg::Standard => ImageQuality::Standard,
            QualityArg::Hd => ImageQuality::Hd,
        }),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = DialConfig::new(cli.api_key, cli.base_url);

    match cli.command {
        Command::ImageToText {
            image,
            deployment,
            prompt,
        } => {
            let model = ModelClient::new(&config, deployment)?;
            let (attachment, reply) =
                tasks::describe_image(&config, &model, &image, &prompt).await?;

            println!("Attachment: {attachment:?}");
            println!("Assistant:\n{}", reply.content);
        }
        Command::TextToImage {
            prompt,
            deployment,
            size,
            style,
            quality,
            out_dir,
        } => {
            let model = ModelClient::new(&config, deployment)?;
            let saved = tasks::generate_images(
                &config,
                &model,
                &prompt,
                image_configuration(size, style, quality),
                &out_dir,
            )
            .await?;

            if saved.is_empty() {
                println!("The model returned no images.");
            }
            for path in saved {
                println!("Image saved locally as {}", path.display());
            }
        }
    }

    Ok(())
}
