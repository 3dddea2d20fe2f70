use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xprint")]
#[command(about = "Save an X/Twitter post or long-form article as a PDF")]
#[command(version)]
pub struct Cli {
    /// Post URL, e.g. https://x.com/user/status/1234567890
    pub url: String,

    /// Output file (defaults to x-<id>.pdf, or x-<id>.html with --html)
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the user config dir, if present)
    #[arg(long, value_name = "FILE", env = "XPRINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the HTML document instead of printing a PDF
    #[arg(long)]
    pub html: bool,

    /// Browser executable used for printing
    #[arg(long, value_name = "PATH")]
    pub browser: Option<PathBuf>,

    /// Query all sources at once instead of one after another
    #[arg(long)]
    pub concurrent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_and_flags() {
        let cli = Cli::try_parse_from([
            "xprint",
            "https://x.com/a/status/1",
            "out/a.html",
            "--html",
            "--concurrent",
            "--browser",
            "/usr/bin/chromium",
        ])
        .unwrap();
        assert_eq!(cli.url, "https://x.com/a/status/1");
        assert_eq!(cli.output, Some(PathBuf::from("out/a.html")));
        assert!(cli.html && cli.concurrent);
        assert_eq!(cli.browser, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn url_is_required() {
        assert!(Cli::try_parse_from(["xprint"]).is_err());
    }
}
