pub mod carrito;
pub mod productos;
