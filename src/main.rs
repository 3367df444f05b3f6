use clap::Parser;
use rustdoc_implementors::cli::{self, Cli, Commands};
use rustdoc_implementors::doc::DocRoot;
use rustdoc_implementors::trace;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trace::init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::List { doc_root, json } => {
            let root = DocRoot::new(cli::expand_tilde(&doc_root).into_owned());
            cli::execute_list(&root, json).await?
        }
        Commands::Show {
            doc_root,
            trait_path,
            json,
        } => {
            let root = DocRoot::new(cli::expand_tilde(&doc_root).into_owned());
            cli::execute_show(&root, &trait_path, json).await?
        }
        Commands::Check { doc_root } => {
            let root = DocRoot::new(cli::expand_tilde(&doc_root).into_owned());
            cli::execute_check(&root).await?
        }
    };
    print!("{}", output);

    Ok(())
}
