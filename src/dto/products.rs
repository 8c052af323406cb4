#[derive(Debug)]
pub struct CreateProductRequest {
    pub name: String,
    /// Minor currency units.
    pub price: i64,
    pub stock: i32,
}

#[derive(Debug)]
pub struct UpdateProductRequest {
    pub price: i64,
    pub stock: i32,
}
