//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::breach::BreachReport;
use crate::generator;
use crate::vault::{CardRecord, PasswordRecord, SyncIssue, VaultReport};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// One warning per sync issue.  The change itself already happened.
pub fn sync_issues(issues: &[SyncIssue]) {
    for issue in issues {
        warning(&format!("Saved locally, but {issue}"));
    }
}

/// Print a table of saved passwords (secrets are never shown here).
pub fn print_passwords_table(records: &[PasswordRecord]) {
    if records.is_empty() {
        info("No passwords saved yet.");
        tip("Run `secura password add --site <SITE> --username <NAME>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Site", "Username", "URL", "Strength", "Created"]);

    for r in records {
        table.add_row(vec![
            r.id.clone(),
            r.site_name.clone(),
            r.username.clone(),
            r.url.clone(),
            generator::strength_label(&r.secret).to_string(),
            r.created_at.format(TIME_FORMAT).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of saved cards with masked numbers.
pub fn print_cards_table(records: &[CardRecord]) {
    if records.is_empty() {
        info("No cards saved yet.");
        tip("Run `secura card add --name <NAME> --holder <HOLDER> --expiry MM/YY` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Type", "Cardholder", "Number", "Expires"]);

    for c in records {
        table.add_row(vec![
            c.id.clone(),
            c.card_name.clone(),
            c.card_type.to_string(),
            c.cardholder_name.clone(),
            c.masked_number(),
            c.expiry_date.clone(),
        ]);
    }

    println!("{table}");
}

/// Print one password record as a two-column table.
pub fn print_password(record: &PasswordRecord, reveal: bool) {
    let secret = if reveal {
        record.secret.clone()
    } else {
        "\u{2022}".repeat(8)
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID", record.id.as_str()]);
    table.add_row(vec!["Site", record.site_name.as_str()]);
    table.add_row(vec!["Username", record.username.as_str()]);
    table.add_row(vec!["Password", secret.as_str()]);
    table.add_row(vec!["Strength", generator::strength_label(&record.secret)]);
    table.add_row(vec!["URL", record.url.as_str()]);
    table.add_row(vec!["Notes", record.notes.as_str()]);
    table.add_row(vec![
        "Created".to_string(),
        record.created_at.format(TIME_FORMAT).to_string(),
    ]);
    println!("{table}");
}

/// Print one card record as a two-column table.
pub fn print_card(record: &CardRecord, reveal: bool) {
    let (number, cvv) = if reveal {
        (record.card_number.clone(), record.cvv.clone())
    } else {
        (record.masked_number(), "*".repeat(record.cvv.len()))
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID", record.id.as_str()]);
    table.add_row(vec!["Name", record.card_name.as_str()]);
    table.add_row(vec!["Type", record.card_type.as_str()]);
    table.add_row(vec!["Cardholder", record.cardholder_name.as_str()]);
    table.add_row(vec!["Number", number.as_str()]);
    table.add_row(vec!["Expires", record.expiry_date.as_str()]);
    table.add_row(vec!["CVV", cvv.as_str()]);
    table.add_row(vec![
        "Created".to_string(),
        record.created_at.format(TIME_FORMAT).to_string(),
    ]);
    println!("{table}");
}

pub fn print_report(report: &VaultReport) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Count"]);
    table.add_row(vec!["Total items".to_string(), report.total_items.to_string()]);
    table.add_row(vec!["Passwords".to_string(), report.passwords.to_string()]);
    table.add_row(vec!["Cards".to_string(), report.cards.to_string()]);
    table.add_row(vec![
        "Weak passwords".to_string(),
        report.weak_passwords.to_string(),
    ]);
    table.add_row(vec![
        "Reused passwords".to_string(),
        report.reused_passwords.to_string(),
    ]);
    println!("{table}");

    if report.weak_passwords > 0 {
        warning(&format!(
            "{} password(s) are shorter than 8 characters.",
            report.weak_passwords
        ));
    }
    if report.reused_passwords > 0 {
        warning(&format!(
            "{} password(s) are used for more than one login.",
            report.reused_passwords
        ));
    }
    if report.weak_passwords == 0 && report.reused_passwords == 0 {
        success("No weak or reused passwords.");
    }
}

pub fn print_breach(report: &BreachReport) {
    if report.breached {
        warning(&format!(
            "This password has appeared in {} known breach(es). Do not use it.",
            report.count
        ));
    } else {
        success("This password was not found in any known breach.");
    }
}
