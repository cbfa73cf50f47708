use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use inventario_api::{
    models::Product,
    response::ApiResponse,
    storefront::{
        cart::CartLedger,
        catalog::{Catalog, TODOS},
        notify::{Notifier, Phase, Severity},
        shell::{self, Command, HELP, ProductRef},
        storage::FileStore,
    },
};

/// Terminal storefront for the productos API.
#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
struct Cli {
    /// Base URL of the inventario API.
    #[arg(long, env = "STOREFRONT_API", default_value = "http://localhost:8080")]
    api: String,

    /// Directory where the cart is persisted.
    #[arg(long, env = "STOREFRONT_DATA", default_value = ".tienda")]
    datos: PathBuf,
}

/// Owns every piece of client state; command handlers borrow it.
struct Storefront {
    http: reqwest::Client,
    api: String,
    catalog: Catalog,
    cart: CartLedger<FileStore>,
    notifier: Notifier,
    /// Product ids in the order of the last printed listing.
    listing: Vec<Uuid>,
}

impl Storefront {
    async fn reload(&mut self) -> anyhow::Result<()> {
        let url = format!("{}/api/productos", self.api.trim_end_matches('/'));
        let resp: ApiResponse<Vec<Product>> = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()?
            .json()
            .await?;
        self.catalog.replace_products(resp.data.unwrap_or_default());
        Ok(())
    }

    fn resolve(&self, product: ProductRef) -> Option<Uuid> {
        match product {
            ProductRef::Row(row) => self.listing.get(row - 1).copied(),
            ProductRef::Id(id) => Some(id),
        }
    }

    fn product(&self, id: Uuid) -> Option<&Product> {
        self.catalog.find(id)
    }

    fn print_listing(&mut self) {
        let visible = self.catalog.visible();
        self.listing = visible.iter().map(|p| p.id).collect();
        if visible.is_empty() {
            println!("(sin productos para \"{}\" en {})", self.catalog.search(), self.catalog.category());
            return;
        }
        for (idx, p) in visible.iter().enumerate() {
            println!(
                "{:>3}. {:<30} {:>10} {:<14} stock {}",
                idx + 1,
                p.nombre,
                p.precio_venta.round_dp(2),
                p.categoria,
                p.stock
            );
        }
    }

    fn print_cart(&self) {
        if self.cart.items().is_empty() {
            println!("carrito vacío");
            return;
        }
        for item in self.cart.items() {
            match self.product(item.producto_id) {
                Some(p) => println!(
                    "  {:<30} x{:<4} {:>10}",
                    p.nombre,
                    item.cantidad,
                    (p.precio_venta * rust_decimal::Decimal::from(item.cantidad)).round_dp(2)
                ),
                None => println!("  {} x{} (no disponible)", item.producto_id, item.cantidad),
            }
        }
        println!(
            "  total: {} ({} unidades)",
            self.cart.compute_total(self.catalog.products()).round_dp(2),
            self.cart.total_item_count()
        );
    }

    /// Returns `false` when the session should end.
    async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::List => self.print_listing(),
            Command::Search(text) => {
                self.catalog.set_search(text);
                self.print_listing();
            }
            Command::Category(category) => {
                let known = category == TODOS || self.catalog.categories().contains(&category);
                if !known {
                    self.notifier.info(format!("categoría sin productos: {category}"));
                }
                self.catalog.set_category(category);
                self.print_listing();
            }
            Command::Add { product, cantidad } => match self.resolve(product) {
                Some(id) if self.product(id).is_some() => match self.cart.add_item(id, cantidad) {
                    Ok(()) => {
                        let nombre = self.product(id).map(|p| p.nombre.clone()).unwrap_or_default();
                        self.notifier.success(format!("{nombre} agregado al carrito"));
                    }
                    Err(err) => {
                        self.notifier.error(err.to_string());
                    }
                },
                _ => {
                    self.notifier.error("producto no encontrado");
                }
            },
            Command::Remove(product) => {
                let removed = self
                    .resolve(product)
                    .is_some_and(|id| self.cart.remove_item(id));
                if removed {
                    self.notifier.success("producto quitado del carrito");
                } else {
                    self.notifier.info("ese producto no está en el carrito");
                }
            }
            Command::SetQuantity { product, cantidad } => match self.resolve(product) {
                Some(id) if self.product(id).is_some() => {
                    if self.cart.set_quantity(id, cantidad) {
                        self.notifier.success("cantidad actualizada");
                    } else {
                        self.notifier.info("el carrito no cambió");
                    }
                }
                _ => {
                    self.notifier.error("producto no encontrado");
                }
            },
            Command::ShowCart => self.print_cart(),
            Command::Clear => {
                self.cart.clear();
                self.notifier.success("carrito vaciado");
            }
            Command::Reload => match self.reload().await {
                Ok(()) => {
                    self.notifier.success(format!("{} productos cargados", self.catalog.products().len()));
                }
                Err(err) => {
                    self.notifier.error(format!("no se pudieron cargar los productos: {err}"));
                }
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }

    fn print_notifications(&self) {
        for n in self.notifier.active() {
            if n.phase == Phase::Leaving {
                continue;
            }
            let icon = match n.severity {
                Severity::Success => "✔",
                Severity::Error => "✖",
                Severity::Info => "ℹ",
            };
            println!("{icon} {}", n.message);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut storefront = Storefront {
        http: reqwest::Client::new(),
        api: cli.api,
        catalog: Catalog::new(),
        cart: CartLedger::open(FileStore::new(cli.datos)),
        notifier: Notifier::new(),
        listing: Vec::new(),
    };
    let badge = storefront.cart.subscribe_count();

    storefront.handle(Command::Reload).await;
    storefront.print_notifications();
    storefront.print_listing();
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("[carrito: {}] >", *badge.borrow());
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match shell::parse(&line) {
            Ok(command) => command,
            Err(shell::ParseError::Empty) => continue,
            Err(err) => {
                storefront.notifier.error(err.to_string());
                storefront.print_notifications();
                continue;
            }
        };
        if !storefront.handle(command).await {
            break;
        }
        storefront.print_notifications();
    }

    Ok(())
}
