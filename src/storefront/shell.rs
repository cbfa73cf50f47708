use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// How a command points at a product: by its row in the last listing
/// (1-based) or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductRef {
    Row(usize),
    Id(Uuid),
}

impl FromStr for ProductRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(row) = s.parse::<usize>() {
            if row == 0 {
                return Err(ParseError::InvalidProduct(s.to_string()));
            }
            return Ok(ProductRef::Row(row));
        }
        Uuid::parse_str(s)
            .map(ProductRef::Id)
            .map_err(|_| ParseError::InvalidProduct(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Category(String),
    Add { product: ProductRef, cantidad: u32 },
    Remove(ProductRef),
    SetQuantity { product: ProductRef, cantidad: u32 },
    ShowCart,
    Clear,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("comando vacío")]
    Empty,
    #[error("comando desconocido: {0}")]
    Unknown(String),
    #[error("falta un argumento: {0}")]
    MissingArgument(&'static str),
    #[error("producto inválido: {0}")]
    InvalidProduct(String),
    #[error("cantidad inválida: {0}")]
    InvalidQuantity(String),
}

pub const HELP: &str = "\
comandos:
  lista                        productos visibles con el filtro actual
  buscar [texto]               filtra por nombre (sin texto: quita el filtro)
  categoria <nombre|todos>     filtra por categoría
  agregar <n|id> [cantidad]    agrega al carrito (cantidad por defecto 1)
  quitar <n|id>                quita la línea del carrito
  cantidad <n|id> <cantidad>   fija la cantidad (0 la quita)
  carrito                      muestra líneas y total
  vaciar                       vacía el carrito
  recargar                     vuelve a pedir los productos
  ayuda | salir";

fn parse_quantity(raw: &str) -> Result<u32, ParseError> {
    raw.parse::<u32>()
        .map_err(|_| ParseError::InvalidQuantity(raw.to_string()))
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    match verb.to_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        "lista" | "ls" => Ok(Command::List),
        "buscar" => Ok(Command::Search(rest.to_string())),
        "categoria" | "categoría" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("categoria"));
            }
            Ok(Command::Category(rest.to_string()))
        }
        "agregar" => {
            let product = args
                .next()
                .ok_or(ParseError::MissingArgument("producto"))?
                .parse()?;
            let cantidad = match args.next() {
                Some(raw) => parse_quantity(raw)?,
                None => 1,
            };
            if cantidad == 0 {
                return Err(ParseError::InvalidQuantity("0".into()));
            }
            Ok(Command::Add { product, cantidad })
        }
        "quitar" => {
            let product = args
                .next()
                .ok_or(ParseError::MissingArgument("producto"))?
                .parse()?;
            Ok(Command::Remove(product))
        }
        "cantidad" => {
            let product = args
                .next()
                .ok_or(ParseError::MissingArgument("producto"))?
                .parse()?;
            let cantidad = parse_quantity(args.next().ok_or(ParseError::MissingArgument("cantidad"))?)?;
            Ok(Command::SetQuantity { product, cantidad })
        }
        "carrito" => Ok(Command::ShowCart),
        "vaciar" => Ok(Command::Clear),
        "recargar" => Ok(Command::Reload),
        "ayuda" | "help" | "?" => Ok(Command::Help),
        "salir" | "exit" | "quit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}
