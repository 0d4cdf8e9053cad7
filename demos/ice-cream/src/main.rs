//! Ice cream parlour command line
//!
//! Drives the parlour stores against the configured backend
//! (`PARLOUR_API_URL`, `.env` supported):
//!
//! ```text
//! ice-cream menu
//! ice-cream available
//! ice-cream edit 3 --price 2.80 --quantity 20
//! ice-cream add 5 --price 1.99 --quantity 10 --description "Summer special"
//! ice-cream delete 3
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use ice_cream::{
    AvailableAction, AvailableReducer, AvailableState, EditorReducer, EditorState, FormEdits,
    MenuAction, MenuReducer, MenuState, ParlourEnvironment, delete_entry, menu_row, submit_edits,
};
use ice_cream::session::ACTION_TIMEOUT;
use parlour_client::{ClientConfig, HttpMenuClient};
use parlour_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};


#[derive(Parser)]
#[command(name = "ice-cream", version, about = "Ice cream parlour menu client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Fields shared by `edit` and `add`
#[derive(clap::Args)]
struct FormArgs {
    /// Price per scoop, e.g. 2.50
    #[arg(long)]
    price: Option<String>,
    /// Scoops available; 0 marks the entry out of stock
    #[arg(long)]
    quantity: Option<String>,
    /// Mark the entry out of stock (zeroes the quantity)
    #[arg(long)]
    out_of_stock: bool,
    /// Description text
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the menu
    Menu,
    /// List stock ice creams that can be added to the menu
    Available,
    /// Edit an existing menu entry
    Edit {
        /// Menu entry id
        id: u64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Add a stock ice cream to the menu
    Add {
        /// Stock ice cream id
        stock_id: u64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Remove a menu entry
    Delete {
        /// Menu entry id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ice_cream=info,parlour_client=info,parlour_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Failed to read client configuration")?;
    tracing::info!(base_url = %config.base_url, "Using menu backend");
    let env = ParlourEnvironment::new(HttpMenuClient::new(config)?);

    match cli.command {
        Commands::Menu => show_menu(env).await,
        Commands::Available => show_available(env).await,
        Commands::Edit { id, form } => {
            let store = Store::new(EditorState::update(id), EditorReducer, env.clone());
            submit_edits(&store, form.into()).await?;
            show_menu(env).await
        },
        Commands::Add { stock_id, form } => {
            let store = Store::new(EditorState::create(stock_id), EditorReducer, env.clone());
            submit_edits(&store, form.into()).await?;
            show_menu(env).await
        },
        Commands::Delete { id } => {
            let store = Store::new(EditorState::update(id), EditorReducer, env.clone());
            delete_entry(&store).await?;
            show_menu(env).await
        },
    }
}

impl From<FormArgs> for FormEdits {
    fn from(args: FormArgs) -> Self {
        Self {
            price: args.price,
            quantity: args.quantity,
            out_of_stock: args.out_of_stock,
            description: args.description,
        }
    }
}

async fn show_menu(env: ParlourEnvironment) -> anyhow::Result<()> {
    let store = Store::new(MenuState::default(), MenuReducer, env);
    let mut handle = store.send(MenuAction::Load).await?;
    handle.wait_with_timeout(ACTION_TIMEOUT).await?;

    let state = store.state(Clone::clone).await;
    store.unmount();
    if let Some(error) = state.error {
        bail!(error);
    }

    println!("---- Menu ----");
    for item in &state.items {
        println!("{:>4}  {}", item.id, menu_row(item));
    }
    Ok(())
}

async fn show_available(env: ParlourEnvironment) -> anyhow::Result<()> {
    let store = Store::new(AvailableState::default(), AvailableReducer, env);
    let mut handle = store.send(AvailableAction::Load).await?;
    handle.wait_with_timeout(ACTION_TIMEOUT).await?;

    let state = store.state(Clone::clone).await;
    store.unmount();
    if let Some(error) = state.error {
        bail!(error);
    }

    println!("---- Available ----");
    for ice_cream in &state.ice_creams {
        println!("{:>4}  {}", ice_cream.id, ice_cream.name);
    }
    Ok(())
}
