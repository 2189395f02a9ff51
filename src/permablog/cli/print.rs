use colored::Colorize;
use permablog::api::{CmdMessage, MessageLevel};
use permablog::blog::PostView;
use permablog::config::{BlogConfig, KEYS};
use permablog::error::Result;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_report(report: Option<&str>) {
    if let Some(report) = report {
        print!("{}", report);
    }
}

pub fn print_json(posts: &[PostView]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(posts)?);
    Ok(())
}

pub fn print_config(config: &BlogConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("{} {}", "Error:".red(), err);
}
