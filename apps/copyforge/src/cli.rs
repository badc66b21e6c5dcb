use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand};

use crate::generation::content_type::ContentType;

/// Marketing copy and brand kit generator.
#[derive(Debug, Parser)]
#[command(name = "copyforge", version, about)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate ad headlines, a caption, a cold email, or landing page copy.
    Copy(CopyArgs),
    /// Generate a brand kit.
    BrandKit(BrandKitArgs),
    /// Analyze product images without generating copy.
    Analyze(AnalyzeArgs),
    /// Inspect and manage saved generations.
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product or brand name.
    #[arg(short, long)]
    pub name: String,

    /// What the product is and does. `copy` can work from images alone.
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Debug, Args)]
pub struct CopyArgs {
    #[command(flatten)]
    pub product: ProductArgs,

    /// Content type to generate.
    #[arg(short = 't', long = "type", value_parser = copy_type_parser(), default_value = "facebook-ad")]
    pub content_type: ContentType,

    /// Product image to analyze first (repeatable, at most 4 are used).
    #[arg(short, long = "image")]
    pub images: Vec<PathBuf>,

    /// Print only the generated text, without a platform preview.
    #[arg(long)]
    pub no_preview: bool,

    /// Also copy the result to the clipboard.
    #[arg(long)]
    pub copy: bool,
}

/// Accepts only the copy types; brand kits have their own command.
fn copy_type_parser() -> impl TypedValueParser<Value = ContentType> {
    PossibleValuesParser::new(ContentType::COPY_TYPES.map(ContentType::key))
        .map(|key| ContentType::from_key_or_default(&key))
}

#[derive(Debug, Args)]
pub struct BrandKitArgs {
    #[command(flatten)]
    pub product: ProductArgs,

    /// Print the model output as-is instead of the parsed sections.
    #[arg(long)]
    pub raw: bool,

    /// Also copy the result to the clipboard.
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Product image (repeatable, at most 4 are used).
    #[arg(short, long = "image", required = true)]
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List saved generations, newest first.
    List,
    /// Print one saved generation.
    Show { id: String },
    /// Delete a saved generation.
    Delete { id: String },
    /// Copy a saved generation to the clipboard.
    Copy { id: String },
    /// Export a saved generation as a PDF report.
    Export {
        id: String,
        /// Output directory (defaults to COPYFORGE_EXPORT_DIR or the current directory).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_copy_args_parse() {
        let cli = Cli::try_parse_from([
            "copyforge", "copy", "-n", "Glow", "-d", "A lamp", "--type", "cold-email", "-i", "a.png",
            "-i", "b.jpg",
        ])
        .unwrap();
        let Command::Copy(args) = cli.command else {
            panic!("expected copy command");
        };
        assert_eq!(args.product.name, "Glow");
        assert_eq!(args.content_type, ContentType::ColdEmail);
        assert_eq!(args.images.len(), 2);
        assert!(!args.copy);
    }

    #[test]
    fn test_copy_type_defaults_to_facebook_ad() {
        let cli = Cli::try_parse_from(["copyforge", "copy", "-n", "Glow", "-d", "A lamp"]).unwrap();
        let Command::Copy(args) = cli.command else {
            panic!("expected copy command");
        };
        assert_eq!(args.content_type, ContentType::FacebookAd);
    }

    #[test]
    fn test_history_export_parses_out_dir() {
        let cli =
            Cli::try_parse_from(["copyforge", "-v", "history", "export", "123", "--out", "/tmp/x"])
                .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::History(HistoryCommand::Export { id, out }) => {
                assert_eq!(id, "123");
                assert_eq!(out, Some(PathBuf::from("/tmp/x")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_copy_type_rejects_brand_kit() {
        let result = Cli::try_parse_from([
            "copyforge", "copy", "-n", "Glow", "-d", "A lamp", "--type", "brand-kit",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_copy_description_is_optional_with_images() {
        let cli = Cli::try_parse_from(["copyforge", "copy", "-n", "Glow", "-i", "a.png"]).unwrap();
        let Command::Copy(args) = cli.command else {
            panic!("expected copy command");
        };
        assert!(args.product.description.is_empty());
        assert_eq!(args.images, vec![PathBuf::from("a.png")]);
    }

    #[test]
    fn test_analyze_requires_an_image() {
        assert!(Cli::try_parse_from(["copyforge", "analyze"]).is_err());
    }
}
