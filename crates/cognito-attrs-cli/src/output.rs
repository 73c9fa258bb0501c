use cognito_attrs_config::ServiceSettings;
use cognito_attrs_core::{ReconcileReport, normalize};
use colored::Colorize;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_report(report: &ReconcileReport) {
    if report.added_attributes.is_empty() {
        print_success(&format!("Pool {} already has every attribute", report.user_pool_id));
    } else {
        let names: Vec<&str> = report
            .added_attributes
            .iter()
            .map(|attr| attr.name.as_str())
            .collect();
        print_success(&format!(
            "Added {} attribute(s) to pool {}: {}",
            names.len(),
            report.user_pool_id,
            names.join(", ")
        ));
    }

    let Some(client_id) = &report.user_pool_client_id else {
        println!("{}", "Client update skipped (no client output key)".dimmed());
        return;
    };
    if report.grants.is_empty() {
        print_success(&format!("Client {client_id} already has every grant"));
        return;
    }
    for (kind, names) in [("read", &report.grants.read), ("write", &report.grants.write)] {
        if !names.is_empty() {
            print_success(&format!(
                "Client {client_id} can now {kind} {}",
                names.join(", ")
            ));
        }
    }
}

pub fn print_settings(settings: &ServiceSettings, stack_name: Option<&str>) {
    let reconcile = &settings.reconcile;
    println!(
        "{}: {}",
        "Service".cyan(),
        settings.service.as_deref().unwrap_or("(not set)")
    );
    println!("{}: {}", "Stage".cyan(), settings.stage);
    println!("{}: {}", "Stack".cyan(), stack_name.unwrap_or("(not derivable)"));
    println!(
        "{}: {}",
        "Region".cyan(),
        settings.region.as_deref().unwrap_or("(from environment)")
    );
    println!("{}: {}", "User pool id output".cyan(), reconcile.user_pool_id_output_key);
    println!(
        "{}: {}",
        "Client id output".cyan(),
        reconcile
            .user_pool_client_id_output_key
            .as_deref()
            .unwrap_or("(client update disabled)")
    );
    println!(
        "{}: {}",
        "Custom attributes".cyan(),
        reconcile.custom_attributes.len()
    );
    for attr in &reconcile.custom_attributes {
        println!("  - {}", normalize(&attr.name));
    }
}
