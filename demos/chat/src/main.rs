//! Chat example binary
//!
//! Reads lines from stdin and sends them as "me"; prints the transcript
//! after every message.

use chat::{ChatReducer, ChatState, actions_for_line};
use parlour_runtime::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat=info,parlour_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Store::new(ChatState::default(), ChatReducer, ());
    tracing::info!("Chat started; type a message and press enter");
    print_transcript(&store).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        for action in actions_for_line(&line) {
            store.send(action).await?;
        }
        print_transcript(&store).await;
    }

    store.unmount();
    tracing::info!("Chat closed");
    Ok(())
}

async fn print_transcript(store: &Store<ChatState, chat::ChatAction, (), ChatReducer>) {
    let messages = store.state(|s| s.messages.clone()).await;
    println!("----");
    for message in messages {
        println!("{:>6}: {}", message.from, message.content);
    }
}
