use clap::{Parser, Subcommand};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;

#[derive(Parser)]
#[command(name = "qs")]
#[command(about = "Command-line client for a running quicksearch service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the vendor of a MAC address
    Mac { address: String },
    /// Print the canonical form of a URL
    Url { url: String },
    /// Show reverse name and ASN information for an IP address
    Ip { address: String },
    /// Find a train journey by number
    Train {
        number: String,
        /// Departure date (YYYY-MM-DD)
        date: Option<String>,
        /// Country code the journey must start or end in
        country: Option<String>,
    },
    /// Print the redirect target of a search provider
    Search { provider: String, query: String },
}

fn segment(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

fn path(command: &Commands) -> String {
    match command {
        Commands::Mac { address } => format!("/mac/{}", segment(address)),
        Commands::Url { url } => format!("/url/{url}"),
        Commands::Ip { address } => format!("/ip/{}", segment(address)),
        Commands::Train { number, date, country } => {
            let mut path = format!("/train/{}", segment(number));
            for part in [date, country].into_iter().flatten() {
                path.push('/');
                path.push_str(&segment(part));
            }
            path
        }
        Commands::Search { provider, query } => {
            format!("/{}/{}", provider.trim_matches('/'), segment(query))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().redirect(Policy::none()).build()?;

    let res = client
        .get(format!("{}{}", cli.url.trim_end_matches('/'), path(&cli.command)))
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status.is_redirection() {
        if let Some(location) = res.headers().get(LOCATION) {
            println!("{}", location.to_str()?);
            return Ok(());
        }
    }

    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprint!("{}", text);
        std::process::exit(1);
    }

    print!("{}", text);
    Ok(())
}
