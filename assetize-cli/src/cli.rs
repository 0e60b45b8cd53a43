use assetize::{ConversionTarget, ExpectedFormat};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "assetize", version, about, args_conflicts_with_subcommands = true, arg_required_else_help = true)]
pub(crate) struct AssetizeCli {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,

    #[clap(long, value_name = "SHELL", help = "Print a completion script for the given shell and exit.")]
    pub(crate) completions: Option<Shell>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Mirror the source tree into the destination tree, converting every image to one target format.
    Convert(ConvertArgs),
    /// Check that every file of a tree has the expected format.
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ConvertArgs {
    #[clap(long, short, value_enum, help = "The format every image is converted to.")]
    pub(crate) target: TargetArg,

    #[clap(long, short, default_value = "sources", help = "The directory tree of source images.")]
    pub(crate) source: PathBuf,

    #[clap(long, short, default_value = "assets", help = "The directory tree the converted images are written to. Existing files are overwritten.")]
    pub(crate) destination: PathBuf,

    #[clap(
        long,
        default_value_t = false,
        help = "Count all source images before converting, so the progress bar starts with the exact total."
    )]
    pub(crate) precount: bool,
}

#[derive(Debug, Args)]
pub(crate) struct VerifyArgs {
    #[clap(long, short, value_enum, help = "The format every file is expected to have.")]
    pub(crate) format: FormatArg,

    #[clap(long, short, default_value = "assets", help = "The directory tree to verify.")]
    pub(crate) root: PathBuf,

    #[clap(long, default_value_t = false, help = "Also fail if a file has the right extension but invalid contents.")]
    pub(crate) strict: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum TargetArg {
    /// 100x100 SVG placeholders labelled with the file name
    Placeholder,
    /// SVGs embedding the raster as base64
    Embed,
    /// Lossy WebP at quality 95
    Webp,
}

impl From<TargetArg> for ConversionTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::Placeholder => ConversionTarget::Placeholder,
            TargetArg::Embed => ConversionTarget::EmbeddedSvg,
            TargetArg::Webp => ConversionTarget::Webp,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    Svg,
    Webp,
}

impl From<FormatArg> for ExpectedFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Svg => ExpectedFormat::Svg,
            FormatArg::Webp => ExpectedFormat::Webp,
        }
    }
}

impl AssetizeCli {
    pub(crate) fn print_completions(shell: Shell) {
        let mut command = Self::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    }
}
