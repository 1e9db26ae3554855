use clap::Parser;

#[derive(Parser)]
#[command(version, about, long_about)]
pub struct UptimedCli {
    /// Sets a custom config file
    #[clap(short, long, default_value = "uptimed.toml")]
    pub config: String,
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    #[clap(name = "serve", about = "Starts the uptimed http server")]
    Serve(ServeSubCommand),
    #[clap(name = "check", about = "Checks sites once and prints the report")]
    Check(CheckSubCommand),
}

#[derive(Parser)]
pub struct ServeSubCommand {
    /// Overrides the configured listen port
    #[clap(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser)]
pub struct CheckSubCommand {
    #[clap(short, long = "site", required = true)]
    pub sites: Vec<String>,
    /// Also posts the report to this url
    #[clap(short, long)]
    pub return_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_with_repeated_sites() {
        let cli = UptimedCli::parse_from([
            "uptimed",
            "check",
            "--site",
            "https://a.example",
            "-s",
            "https://b.example",
        ]);

        assert_eq!(cli.config, "uptimed.toml");
        match cli.subcmd {
            SubCommand::Check(check) => {
                assert_eq!(check.sites, vec!["https://a.example", "https://b.example"]);
                assert!(check.return_url.is_none());
            }
            SubCommand::Serve(_) => panic!("expected check"),
        }
    }

    #[test]
    fn check_requires_a_site() {
        assert!(UptimedCli::try_parse_from(["uptimed", "check"]).is_err());
    }

    #[test]
    fn serve_accepts_port_override() {
        let cli = UptimedCli::parse_from([
            "uptimed",
            "-c",
            "/etc/uptimed.toml",
            "serve",
            "-p",
            "9000",
        ]);
        assert_eq!(cli.config, "/etc/uptimed.toml");
        assert!(matches!(
            cli.subcmd,
            SubCommand::Serve(ServeSubCommand { port: Some(9000) })
        ));
    }
}
