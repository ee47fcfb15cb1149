//! `chat` command: one exchange with the support bot.

use shopsmart_storefront::AppState;
use shopsmart_storefront::chat::ChatSession;
use shopsmart_storefront::error::Result;

/// Send one message and print the bot's side of the exchange.
///
/// A transport failure prints the fixed fallback line; it is not an error.
pub async fn send(state: &AppState, message: &str) -> Result<()> {
    let mut session = ChatSession::new();
    let reply = session.send(state.chat(), message).await;
    println!("bot: {}", reply.text);
    Ok(())
}
