use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use snapcart::application::session::{CheckoutSession, SubmitOutcome};
use snapcart::domain::checkout::{CompletedOrder, ProofKind};
use snapcart::domain::order::{BuyerInfo, Order};
use snapcart::infrastructure::in_memory::{InMemoryDirectory, SimulatedGateway};
use snapcart::interfaces::csv::directory_reader::DirectoryReader;
use snapcart::interfaces::csv::line_item_reader::LineItemReader;
use snapcart::interfaces::csv::payment_reader::PaymentInstructionReader;
use snapcart::interfaces::csv::receipt_writer::{ReceiptRow, ReceiptWriter};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cart line items CSV file (photo, photographer, price)
    cart: PathBuf,

    /// Photographer directory CSV (id, name, bank, tax_id, phone, account_holder)
    #[arg(long)]
    directory: PathBuf,

    /// Payment instructions CSV to replay (photographer, reference, proof)
    #[arg(long)]
    payments: Option<PathBuf>,

    /// Write the completed order as JSON to this path
    #[arg(long)]
    order_out: Option<PathBuf>,

    /// Buyer name (required with --order-out)
    #[arg(long)]
    buyer_name: Option<String>,

    /// Buyer email (required with --order-out)
    #[arg(long)]
    buyer_email: Option<String>,

    /// Buyer phone (required with --order-out)
    #[arg(long)]
    buyer_phone: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let directory = InMemoryDirectory::new();
    let file = File::open(&cli.directory).into_diagnostic()?;
    for result in DirectoryReader::new(file).photographers() {
        match result {
            Ok(photographer) => directory.insert(photographer).await,
            Err(e) => eprintln!("Error reading photographer: {}", e),
        }
    }

    let file = File::open(&cli.cart).into_diagnostic()?;
    let mut items = Vec::new();
    for result in LineItemReader::new(file).line_items() {
        match result {
            Ok(item) => items.push(item),
            Err(e) => eprintln!("Error reading line item: {}", e),
        }
    }

    let mut session = CheckoutSession::open(
        &items,
        &directory,
        Box::new(SimulatedGateway::default()),
    )
    .await
    .into_diagnostic()?;

    let mut completed: Option<CompletedOrder> = None;
    if let Some(payments) = &cli.payments {
        let file = File::open(payments).into_diagnostic()?;
        for result in PaymentInstructionReader::new(file).instructions() {
            let instruction = match result {
                Ok(instruction) => instruction,
                Err(e) => {
                    eprintln!("Error reading payment instruction: {}", e);
                    continue;
                }
            };
            if !session.begin_payment(&instruction.photographer) {
                eprintln!(
                    "Skipping payment for {}: not an unpaid photographer in this cart",
                    instruction.photographer
                );
                continue;
            }
            session.set_reference(&instruction.reference);
            if let Some(proof) = &instruction.proof
                && let Some(kind) = ProofKind::from_file_name(proof)
            {
                session.attach_proof(proof, kind.mime());
            }
            match session.submit().await {
                Ok(SubmitOutcome::Complete(order)) => completed = Some(order),
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error registering payment: {}", e);
                    session.cancel_entry();
                }
            }
        }
    }

    let rows: Vec<ReceiptRow> = session
        .groups()
        .iter()
        .map(|(id, group)| {
            let submission = completed
                .as_ref()
                .and_then(|order| order.submissions.iter().find(|s| &s.photographer == id))
                .or_else(|| session.submission(id));
            ReceiptRow::new(id, group, submission)
        })
        .collect();

    let stdout = io::stdout();
    let mut writer = ReceiptWriter::new(stdout.lock());
    writer.write_rows(rows).into_diagnostic()?;

    if let Some(path) = &cli.order_out {
        let order = completed
            .take()
            .ok_or_else(|| miette!("--order-out given but the checkout did not complete"))?;
        let buyer = BuyerInfo::new(
            cli.buyer_name.as_deref().unwrap_or_default(),
            cli.buyer_email.as_deref().unwrap_or_default(),
            cli.buyer_phone.as_deref().unwrap_or_default(),
        )
        .into_diagnostic()?;
        let placed = Order::place("order-1", buyer, order);
        let json = serde_json::to_string_pretty(&placed).into_diagnostic()?;
        std::fs::write(path, json).into_diagnostic()?;
    }

    Ok(())
}
