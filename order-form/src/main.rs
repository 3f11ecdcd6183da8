use clap::Parser;
use order_form::{Args, Config, FormError, FormSnapshot, OrderForm, StatusNotice, init_logger};
use shared::OrderValidator;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 1. Environment (.env), arguments, logging
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = Config::from_env().with_args(&args);
    init_logger(&config.log_level);

    // 2. Form snapshot, as after pressing submit
    let snapshot = FormSnapshot::new(args.draft()?).touch_all();

    if args.dry_run {
        return match OrderValidator::finalize(snapshot.draft()) {
            Ok(order) => {
                println!("{}", serde_json::to_string_pretty(&order)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(_) => {
                print_field_errors(&snapshot);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    // 3. Send
    tracing::info!(endpoint = %config.endpoint, "Order form ready");
    let form = OrderForm::new(config.client_config().build_http_client()?);
    let outcome = form.submit(snapshot).await;

    if let Err(FormError::Validation(_)) = &outcome.result {
        print_field_errors(&outcome.snapshot);
    }
    if let Some(notice) = StatusNotice::from_outcome(&outcome.result) {
        println!("{notice}");
    }

    match outcome.result {
        Ok(reply) => {
            tracing::debug!(%reply, "Server reply");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Submit failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_field_errors(snapshot: &FormSnapshot) {
    for (field, message) in snapshot.visible_errors() {
        eprintln!("{}: {}", field.label(), message);
    }
}
