use anyhow::{bail, Result};
use clap::Parser;
use client_core::{load_settings, FormController, HttpFeeService, Presentation, StudentMode};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Look up a student's fee record and optionally record a payment.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    grade: String,
    #[arg(long)]
    fname: String,
    #[arg(long)]
    lname: String,
    /// Total fee, only used when the student is new.
    #[arg(long)]
    total_fee: Option<String>,
    /// Payment amount to record after the lookup.
    #[arg(long)]
    payment: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let service = HttpFeeService::from_settings(&settings)?;
    debug!(server_url = service.server_url(), "using fee service");
    let mut controller = FormController::new(service, Presentation::from(&settings));

    let form = controller.form_mut();
    form.grade.enter(args.grade);
    form.fname.enter(args.fname);
    form.lname.enter(args.lname);

    let lookup = controller.lookup().await;
    print!("{}", controller.page());
    let mode = match lookup {
        Ok(mode) => mode,
        Err(err) => bail!("lookup failed: {err}"),
    };

    let Some(payment) = args.payment else {
        return Ok(());
    };

    if let Some(total_fee) = args.total_fee {
        if !controller.form_mut().total_fee.enter(total_fee) {
            warn!("total fee is fixed for an existing student; ignoring --total-fee");
        }
    } else if mode == StudentMode::New {
        warn!("new student without --total-fee; the payment will be refused");
    }
    controller.form_mut().new_payment.enter(payment);

    let submitted = controller.submit_payment().await;
    println!();
    print!("{}", controller.page());
    if let Err(err) = submitted {
        bail!("payment failed: {err}");
    }

    Ok(())
}
