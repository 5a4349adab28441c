mod api;
mod llm;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use skin_advisor::commission::{calculate_commission, daily_projection, DEFAULT_AVG_COMMISSION_RATE};
use skin_advisor::config::AppConfig;
use skin_advisor::scoring::score_insights;
use skin_advisor::{
    compute_scores, estimate_skin_age, telemetry, AgeBracket, PartnerRegistry, PrimaryConcern,
    Product, ProductCatalog, ProductCategory, RecommendationContext, RecommendationEngine,
    ScoreInput, SkinScores,
};

#[derive(Parser)]
#[command(name = "skin-advisor", about = "Skin diagnosis and skincare recommendation service")]
struct Cli {
    /// TOML config file; defaults to ADVISOR_CONFIG_PATH or config/advisor.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Serve(ServeArgs),
    Score(ProfileArgs),
    Recommend(RecommendArgs),
    Commission(CommissionArgs),
    Project(ProjectArgs),
    /// Write the effective configuration as a TOML template.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    web_root: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ProfileArgs {
    /// Visible observation, repeatable.
    #[arg(long = "concern")]
    concerns: Vec<String>,
    #[arg(long)]
    main_concern: Option<String>,
    #[arg(long, default_value = "26-35")]
    age: String,
    #[arg(long = "sensitivity")]
    sensitivities: Vec<String>,
    #[arg(long, default_value_t = 1.0)]
    confidence: f64,
}

#[derive(Args, Debug, Clone)]
struct RecommendArgs {
    #[command(flatten)]
    profile: ProfileArgs,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long, conflicts_with = "category")]
    routine: bool,
}

#[derive(Args, Debug, Clone)]
struct CommissionArgs {
    #[arg(long)]
    partner: String,
    #[arg(long)]
    price: f64,
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Args, Debug, Clone)]
struct ProjectArgs {
    #[arg(long, default_value_t = 50.0)]
    avg_order_value: f64,
    #[arg(long, default_value_t = 100.0)]
    daily_clicks: f64,
    #[arg(long, default_value_t = 3.0)]
    conversion_rate: f64,
    #[arg(long, default_value_t = DEFAULT_AVG_COMMISSION_RATE)]
    avg_commission_rate: f64,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/advisor.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = AppConfig::load(cli.config)?;
    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => {
            telemetry::init(&config.logging).map_err(|err| err.to_string())?;
            if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
                tracing::info!(path = %path.display(), "config loaded");
            }
            server::serve(apply_serve_args(config, args)).await
        }
        Command::Score(args) => run_score(args),
        Command::Recommend(args) => run_recommend(&config, args),
        Command::Commission(args) => run_commission(args),
        Command::Project(args) => {
            run_project(args);
            Ok(())
        }
        Command::InitConfig(args) => {
            config.write(&args.path)?;
            println!("Config written to {}", args.path.display());
            Ok(())
        }
    }
}

fn apply_serve_args(mut config: AppConfig, args: ServeArgs) -> AppConfig {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(web_root) = args.web_root {
        config.server.web_root = web_root;
    }
    config
}

fn profile_scores(args: &ProfileArgs) -> Result<(SkinScores, i32), String> {
    let age = AgeBracket::from_str(&args.age)
        .ok_or_else(|| format!("invalid age bracket: {}", args.age))?;
    let primary_concern = match args.main_concern.as_deref() {
        Some(value) => Some(
            PrimaryConcern::from_str(value)
                .ok_or_else(|| format!("invalid main concern: {}", value))?,
        ),
        None => None,
    };
    if !(0.0..=1.0).contains(&args.confidence) {
        return Err(format!("confidence must be within 0..1: {}", args.confidence));
    }

    let input = ScoreInput {
        concerns: args.concerns.clone(),
        primary_concern,
        age,
        sensitivities: args.sensitivities.clone(),
        is_conservative: matches!(primary_concern, Some(PrimaryConcern::Unknown)),
        confidence: args.confidence,
    };
    let scores = compute_scores(&input);
    let skin_age = estimate_skin_age(&scores, age, args.confidence);
    Ok((scores, skin_age))
}

fn run_score(args: ProfileArgs) -> Result<(), String> {
    let (scores, skin_age) = profile_scores(&args)?;
    for (field, score) in scores.entries() {
        println!("{:<12} {:>3}/100", field.label(), score);
    }
    println!("Âge de peau estimé: {} ans", skin_age);

    let insights = score_insights(&scores);
    if !insights.strengths.is_empty() {
        println!("\nPoints forts:");
        for strength in &insights.strengths {
            println!("- {}", strength);
        }
    }
    if !insights.improvements.is_empty() {
        println!("\nÀ améliorer:");
        for improvement in &insights.improvements {
            println!("- {}", improvement);
        }
    }
    println!("\nPriorité: {}", insights.priority);
    Ok(())
}

fn run_recommend(config: &AppConfig, args: RecommendArgs) -> Result<(), String> {
    let (scores, skin_age) = profile_scores(&args.profile)?;
    let context = RecommendationContext::from_parts(
        Some(&scores),
        Some(skin_age),
        None,
        args.profile.concerns.clone(),
    );
    let catalog = match config.catalog.path.as_deref() {
        Some(path) => ProductCatalog::from_path(Path::new(path)).map_err(|err| err.to_string())?,
        None => ProductCatalog::builtin(),
    };
    let engine = RecommendationEngine::from_config(&config.recommendation);

    if args.routine {
        let routine = engine.routine(&context, &catalog);
        println!("Matin:");
        print_products(&routine.morning);
        println!("\nSoir:");
        print_products(&routine.evening);
        return Ok(());
    }

    let category = match args.category.as_deref() {
        Some(value) => Some(
            ProductCategory::from_str(value)
                .ok_or_else(|| format!("invalid category: {}", value))?,
        ),
        None => None,
    };
    let limit = args.limit.unwrap_or(config.recommendation.default_limit);
    let ranked = engine.rank(&context, &catalog, category);
    for scored in ranked.iter().take(limit) {
        println!(
            "{:>7.1}  {} - {} ({:.2}€)",
            scored.score, scored.product.brand, scored.product.name, scored.product.price
        );
    }
    Ok(())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("  (aucun produit)");
    }
    for product in products {
        println!("  {} - {} [{}]", product.brand, product.name, product.category.label());
    }
}

fn run_commission(args: CommissionArgs) -> Result<(), String> {
    let partners = PartnerRegistry::builtin();
    let commission = calculate_commission(&partners, &args.partner, args.price, args.quantity)
        .map_err(|err| err.to_string())?;
    println!(
        "{}: {:.2} {} on {:.2} {} ({:.0}%)",
        commission.partner_id,
        commission.estimated_commission,
        commission.currency,
        commission.base_price,
        commission.currency,
        commission.commission_rate * 100.0
    );
    Ok(())
}

fn run_project(args: ProjectArgs) {
    let projection = daily_projection(
        args.avg_order_value,
        args.daily_clicks,
        args.conversion_rate,
        args.avg_commission_rate,
    );
    println!("Daily revenue:   {:.2}", projection.daily_revenue);
    println!("Monthly revenue: {:.2}", projection.monthly_revenue);
    println!("Yearly revenue:  {:.2}", projection.yearly_revenue);
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
