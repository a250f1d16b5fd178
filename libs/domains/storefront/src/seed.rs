//! Sample catalog inserted into an empty store.

use crate::models::Mousepad;

const SAMPLE_PRICE: f64 = 39.99;

pub fn sample_mousepads() -> Vec<Mousepad> {
    vec![
        Mousepad::new(
            "Nebula Drift",
            SAMPLE_PRICE,
            "Vibrant deep-space swirls on a smooth micro\u{2011}weave surface.",
        )
        .with_image("https://images.unsplash.com/photo-1450849608880-6f787542c88a?q=80&w=1600&auto=format&fit=crop")
        .with_stock_qty(25),
        Mousepad::new(
            "Midnight Circuit",
            SAMPLE_PRICE,
            "Minimal cyber lines in electric blue over matte black.",
        )
        .with_image("https://images.unsplash.com/photo-1518779578993-ec3579fee39f?q=80&w=1600&auto=format&fit=crop")
        .with_stock_qty(30),
        Mousepad::new(
            "Sakura Flow",
            SAMPLE_PRICE,
            "Calming pastel petals flowing across your desk.",
        )
        .with_image("https://images.unsplash.com/photo-1497250681960-ef046c08a56e?q=80&w=1600&auto=format&fit=crop")
        .with_stock_qty(18),
    ]
}
