#[derive(Debug)]
pub struct AddItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}
