use crate::demo::{
    run_demo, run_lenders, run_mortgage_calculate, run_mortgage_match, run_rent_predict,
    DemoArgs, MortgageCalculateArgs, MortgageMatchArgs, RentPredictArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Nigeria Property Hub",
    about = "Run the property marketplace API or its calculators from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Mortgage calculator, product matcher, and lender reference table
    Mortgage {
        #[command(subcommand)]
        command: MortgageCommand,
    },
    /// Fair-rent estimates for a property
    Rent {
        #[command(subcommand)]
        command: RentCommand,
    },
    /// Walk through listings, rent estimates, and a mortgage application end to end
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MortgageCommand {
    /// Compute the monthly repayment and lifetime totals for a loan
    Calculate(MortgageCalculateArgs),
    /// Rank mortgage products for a borrower profile
    Match(MortgageMatchArgs),
    /// List the headline terms of Nigerian mortgage lenders
    Lenders,
}

#[derive(Subcommand, Debug)]
enum RentCommand {
    /// Estimate fair monthly and yearly rent
    Predict(RentPredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Mortgage {
            command: MortgageCommand::Calculate(args),
        } => run_mortgage_calculate(args),
        Command::Mortgage {
            command: MortgageCommand::Match(args),
        } => run_mortgage_match(args),
        Command::Mortgage {
            command: MortgageCommand::Lenders,
        } => {
            run_lenders();
            Ok(())
        }
        Command::Rent {
            command: RentCommand::Predict(args),
        } => {
            run_rent_predict(args);
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
