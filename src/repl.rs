use crate::catalog::{self, ListingFilter};
use crate::chat::format::format_price;
use crate::chat::{Reply, ReplyKind, Session, GREETING};
use crate::concierge::Concierge;
use crate::models::PropertyRecord;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

/// Read messages from stdin until EOF or `quit`
pub async fn run_chat(concierge: &Concierge) -> Result<()> {
    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("🏡 Real Estate Concierge");
    println!("{}", GREETING);
    print_actions(&session.actions);

    loop {
        let prompt: &[u8] = if session.flow.is_active() { b"booking> " } else { b"> " };
        stdout.write_all(prompt).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit") {
            break;
        }

        // A bare number picks one of the offered quick actions
        let message = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| session.actions.get(i).cloned())
            .unwrap_or_else(|| line.clone());

        let reply = concierge.handle(&mut session, &message).await?;
        print_reply(&reply);

        if shows_grid(&session, &reply) {
            let listings = catalog::browse(concierge.store(), &ListingFilter::default());
            print_cards(&listings);
        }
    }

    info!("Chat ended after {} messages", session.history.len());
    Ok(())
}

/// The grid is redrawn on every "show all listings" reply while the flag is set
fn shows_grid(session: &Session, reply: &Reply) -> bool {
    session.show_listings && reply.kind == ReplyKind::ListingGrid
}

fn print_reply(reply: &Reply) {
    println!();
    println!("{}", reply.text);
    println!();
    print_actions(&reply.actions);
}

fn print_actions(actions: &[String]) {
    if actions.is_empty() {
        return;
    }
    let menu: Vec<String> = actions
        .iter()
        .enumerate()
        .map(|(i, a)| format!("[{}] {}", i + 1, a))
        .collect();
    println!("🔍 {}", menu.join("  "));
}

/// Print one card per listing
pub fn print_cards(listings: &[&PropertyRecord]) {
    println!("\n🏠 Available Properties ({})\n", listings.len());
    for (i, p) in listings.iter().enumerate() {
        println!("{}. {} ({} • {})", i + 1, p.property_name, p.property_type, p.city);

        let mut specs = Vec::new();
        if p.bedrooms() > 0 {
            specs.push(format!("{} BR", p.bedrooms()));
        }
        if p.bathrooms() > 0 {
            specs.push(format!("{} Bath", p.bathrooms()));
        }
        if p.area_sqft > 0.0 {
            specs.push(format!("{} sqft", p.area_sqft as i64));
        }
        if !specs.is_empty() {
            println!("   {}", specs.join(" • "));
        }

        println!("   {}", p.short_description);
        println!("   Price: {}", format_price(p.price, &p.price_currency));
        println!("   Availability: {}", p.availability);
        println!("   ID: {}", p.listing_id);
        println!();
    }
}
