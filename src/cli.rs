use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "meme")]
#[command(about = "Personal meme and link vault with Open Graph previews", long_about = None)]
pub struct Cli {
    /// Use local vault (./.meme/vault)
    #[arg(short, long, global = true)]
    pub local: bool,

    /// Use global vault (~/.meme/vault)
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Initialize meme configuration (optional, defaults apply without it)")]
    Init,

    #[command(about = "Store a URL (fetching its preview) or import a local image")]
    Add {
        /// URL (http/https) or path to a local image file
        input: String,

        /// Title to use instead of the scraped one
        #[arg(long)]
        title: Option<String>,

        /// Description to use instead of the scraped one
        #[arg(long)]
        description: Option<String>,
    },

    #[command(about = "List memes, favorites first, most recently used first")]
    List {
        /// Only show memes whose URL, title or description contains this text
        query: Option<String>,

        /// Print the matching records as JSON
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Browse, search and act on memes interactively")]
    Browse,

    #[command(about = "Print a meme's URL and count it as used")]
    Copy {
        /// Meme ID (or unique prefix)
        id: String,
    },

    #[command(about = "Print a meme's image URL")]
    CopyImage {
        /// Meme ID (or unique prefix)
        id: String,
    },

    #[command(about = "Add or remove a meme from favorites")]
    Favorite {
        /// Meme ID (or unique prefix)
        id: String,
    },

    #[command(about = "Delete a meme (and its local image)")]
    Delete {
        /// Meme ID (or unique prefix)
        id: String,

        /// Skip confirmation prompt (use with caution)
        #[arg(short, long)]
        force: bool,
    },

    #[command(about = "Print a meme's shareable metadata as JSON")]
    Show {
        /// Meme ID (or unique prefix)
        id: String,
    },

    #[command(about = "Show vault statistics")]
    Stats,

    #[command(about = "Fetch and print a URL's preview metadata without saving it")]
    Preview {
        /// URL (http/https) to scrape
        url: String,
    },
}

impl Commands {
    /// 是否需要先打开数据目录（init 只写配置，不读取）
    pub fn needs_vault(&self) -> bool {
        !matches!(self, Commands::Init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_overrides() {
        let cli = Cli::parse_from([
            "meme",
            "add",
            "https://tenor.com/view/cat-dance",
            "--title",
            "Cat",
            "--local",
        ]);

        assert!(cli.local);
        match cli.command {
            Commands::Add {
                input,
                title,
                description,
            } => {
                assert_eq!(input, "https://tenor.com/view/cat-dance");
                assert_eq!(title.as_deref(), Some("Cat"));
                assert!(description.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_delete_force() {
        let cli = Cli::parse_from(["meme", "-g", "delete", "abc", "-f"]);
        assert!(cli.global);
        assert!(matches!(cli.command, Commands::Delete { force: true, .. }));
    }

    #[test]
    fn test_init_runs_without_opening_vault() {
        let cli = Cli::parse_from(["meme", "init", "--local"]);
        assert!(!cli.command.needs_vault());

        for args in [
            vec!["meme", "list"],
            vec!["meme", "stats"],
            vec!["meme", "add", "https://a.example"],
        ] {
            assert!(Cli::parse_from(args).command.needs_vault());
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
