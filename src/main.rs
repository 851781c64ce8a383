//! Flotilla CLI
//!
//! Launches the desktop panel, or runs the headless subcommands for the
//! interaction coordinator and the locale helpers.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use console::style;
use flotilla::coordinator::alert::AUTO_DISMISS_DELAY;
use flotilla::coordinator::debounce::QUIET_WINDOW;
use flotilla::coordinator::toast::{TOAST_FADE, TOAST_LIFETIME};
use flotilla::{
    format_fecha, format_guaranies, AppConfig, Coordinator, DemoSource, FragmentRequest,
    FragmentSource, LifecycleEvent, Page, Severity,
};

/// Flotilla - Panel de gestión de flota de buses
#[derive(Parser)]
#[command(name = "flotilla")]
#[command(author = "Flotilla Contributors")]
#[command(version)]
#[command(about = "Panel de gestión de flota de buses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the desktop panel (default)
    Gui {
        /// Config file path (JSON); defaults next to the executable
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Walk the interaction coordinator headless and print transitions
    Demo,

    /// Print locale formatting samples
    Formato {
        /// Amount in Guaraníes
        #[arg(long, default_value = "15000")]
        monto: i64,

        /// Date string to format (e.g. 2026-09-01 07:30)
        #[arg(long)]
        fecha: Option<String>,
    },
}

fn main() {
    flotilla::logging::init();

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Commands::Gui { config: None }) {
        Commands::Gui { config } => run_gui(config),
        Commands::Demo => run_demo(),
        Commands::Formato { monto, fecha } => run_formato(monto, fecha),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run_gui(config_path: Option<PathBuf>) -> flotilla::Result<()> {
    let path = config_path.unwrap_or_else(AppConfig::default_path);
    let config = match AppConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            // First run or unreadable file: fall back to defaults.
            flotilla::logging::warn("CLI", &format!("config: {}", e));
            AppConfig::default()
        }
    };
    flotilla::gui::run(config)
}

/// Drive the coordinator against the demo backend with synthetic time and
/// print every transition. No window, no sleeping.
fn run_demo() -> flotilla::Result<()> {
    let source = DemoSource::with_latency(Duration::ZERO);
    let mut page = demo_page();
    let t0 = Instant::now();
    let mut coordinator = Coordinator::start(&page, t0);

    println!("{}", style("== Flotilla: recorrido del coordinador ==").bold());
    println!(
        "tooltips adheridos al inicio: {}",
        coordinator.tooltips().attached_count()
    );

    // Partial update of the dashboard region.
    let request = FragmentRequest {
        region: "resumen".to_string(),
        query: None,
    };
    coordinator.on_lifecycle(
        &LifecycleEvent::BeforeRequest {
            target: Some(request.region.clone()),
        },
        &mut page,
    );
    println!(
        "before-request: resumen cargando = {}",
        page.region("resumen").map(|r| r.loading).unwrap_or(false)
    );

    let fragment = source.render(&request)?;
    coordinator.on_lifecycle(
        &LifecycleEvent::AfterRequest {
            target: Some(request.region.clone()),
        },
        &mut page,
    );
    page.swap_region(fragment);
    coordinator.on_lifecycle(
        &LifecycleEvent::AfterSwap {
            target: request.region.clone(),
        },
        &mut page,
    );
    println!(
        "after-swap: tooltips adheridos = {}",
        coordinator.tooltips().attached_count()
    );

    // Debounced search feedback: three keystrokes, one reset.
    for i in 0..3u64 {
        coordinator.search_input("search", &mut page, t0 + Duration::from_millis(100 * i));
    }
    let last_key = t0 + Duration::from_millis(200);
    println!(
        "teclas rápidas: reset pendiente en +{} ms del último evento",
        QUIET_WINDOW.as_millis()
    );
    coordinator.tick(&mut page, last_key + QUIET_WINDOW);
    println!("reset disparado: botón restaurado");

    // Toasts.
    coordinator.show_toast("Guardado", Severity::Success, last_key);
    coordinator.show_toast("Error de validación", Severity::Danger, last_key);
    println!("toasts activos: {}", coordinator.toasts().len());
    coordinator.tick(&mut page, last_key + TOAST_LIFETIME + TOAST_FADE);
    println!(
        "tras {} ms: toasts activos: {}",
        (TOAST_LIFETIME + TOAST_FADE).as_millis(),
        coordinator.toasts().len()
    );

    // Alert auto-dismissal.
    coordinator.tick(&mut page, t0 + AUTO_DISMISS_DELAY);
    println!(
        "alerta de bienvenida visible tras {} ms: {}",
        AUTO_DISMISS_DELAY.as_millis(),
        page.alerts.first().map(|a| a.visible).unwrap_or(false)
    );

    Ok(())
}

fn run_formato(monto: i64, fecha: Option<String>) -> flotilla::Result<()> {
    println!(
        "{} {}",
        style("moneda:").cyan(),
        style(format_guaranies(monto)).bold()
    );
    if let Some(fecha) = fecha {
        println!("{} {}", style("fecha:").cyan(), format_fecha(&fecha)?);
    } else {
        println!(
            "{} {}",
            style("fecha:").cyan(),
            format_fecha("2026-09-01 07:30")?
        );
    }
    Ok(())
}

/// Page used by the headless walk-through: same shape the panel builds.
fn demo_page() -> Page {
    use flotilla::page::{SearchForm, SubmitButton};
    use flotilla::{AlertBanner, Region};

    Page {
        regions: vec![
            Region::pending("resumen", "Resumen"),
            Region::pending("itinerarios", "Itinerarios"),
        ],
        alerts: vec![AlertBanner::new(
            "bienvenida",
            Severity::Info,
            "Bienvenido al panel de gestión de flota",
        )],
        forms: vec![SearchForm {
            input_name: "search".to_string(),
            target_region: "itinerarios".to_string(),
            button: Some(SubmitButton::default()),
        }],
    }
}
