use escpos_receipt::{ReceiptDocument, OrderPayload, ReceiptOptions, PrinterModel, Error};

const ORDER: &str = r#"{
    "orderNo": "12345",
    "orderid": "ORD-987654",
    "timeStamp": "31/03/2025 14:30",
    "userid": "John Doe",
    "userPhone": "+91 9876543210",
    "payment": "Online Payment",
    "items": [
        {"name": "Paneer Tikka", "qty": 2, "price": 180, "total": 360},
        {"name": "Butter Naan", "qty": 4, "price": 40, "total": 160},
        {"name": "Dal Makhani", "qty": 1, "price": 150, "total": 150}
    ],
    "subtotal": 670,
    "tax": 33.5,
    "total": 703.5
}"#;

fn main() -> Result<(), Error> {
    env_logger::init();

    let order: OrderPayload = match serde_json::from_str(ORDER) {
        Ok(order) => order,
        Err(e) => panic!("Malformed order: {}", e)
    };
    let printer_profile = PrinterModel::TMT20.profile();

    let mut document = ReceiptDocument::new();
    document.render_order(&order, &ReceiptOptions::default());

    println!("{}", document.preview(&printer_profile));

    let buffer = document.compile(&printer_profile)?;
    println!("{} bytes", buffer.len());
    for chunk in buffer.as_bytes().chunks(16) {
        let hex: Vec<String> = chunk.iter().map(|byte| format!("{:02x}", byte)).collect();
        println!("{}", hex.join(" "));
    }
    Ok(())
}
