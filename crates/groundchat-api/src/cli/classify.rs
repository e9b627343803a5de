//! `groundchat classify` -- show the INIT analysis of an utterance.

use anyhow::Result;
use console::style;

use groundchat_core::turn::{TurnPath, TurnPlan};
use groundchat_types::chat::{ChatMessage, Conversation};
use groundchat_types::config::GlobalConfig;

pub fn classify(config: &GlobalConfig, text: &str, json: bool) -> Result<()> {
    let conversation = Conversation::new(vec![ChatMessage::user(text)]);
    let plan = TurnPlan::analyze(&conversation, config.turn.search_query_chars);
    let path = match plan.path() {
        TurnPath::Direct => "direct",
        TurnPath::Streaming => "streaming",
    };

    if json {
        let report = serde_json::json!({
            "locale": plan.locale.as_str(),
            "urls": plan.urls,
            "needs_search": plan.needs_search,
            "search_query": plan.needs_search.then_some(&plan.search_query),
            "path": path,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  {}      {}", style("Locale").dim(), style(plan.locale).bold());
    println!("  {}        {}", style("Path").dim(), style(path).cyan());
    println!(
        "  {}      {}",
        style("Search").dim(),
        if plan.needs_search {
            style("yes").green()
        } else {
            style("no").dim()
        }
    );
    if plan.needs_search {
        println!("  {}       {}", style("Query").dim(), plan.search_query);
    }
    if plan.urls.is_empty() {
        println!("  {}        {}", style("URLs").dim(), style("none").dim());
    } else {
        for url in &plan.urls {
            println!("  {}        {}", style("URL").dim(), style(url).underlined());
        }
    }
    println!();
    Ok(())
}
