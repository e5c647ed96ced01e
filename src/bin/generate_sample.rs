use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use launch_dash::data::loader::{
    COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS, COL_FLIGHT_NUMBER, COL_PAYLOAD, COL_SITE,
};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (category, version prefix, success probability, max payload)
const BOOSTERS: [(&str, &str, f64, f64); 5] = [
    ("v1.0", "F9 v1.0", 0.2, 1000.0),
    ("v1.1", "F9 v1.1", 0.35, 4500.0),
    ("FT", "F9 FT", 0.7, 6500.0),
    ("B4", "F9 B4", 0.6, 9600.0),
    ("B5", "F9 B5", 0.9, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_launches = 120;

    let mut flight: Vec<i64> = Vec::with_capacity(n_launches);
    let mut site: Vec<&str> = Vec::with_capacity(n_launches);
    let mut class: Vec<i64> = Vec::with_capacity(n_launches);
    let mut payload: Vec<f64> = Vec::with_capacity(n_launches);
    let mut version: Vec<String> = Vec::with_capacity(n_launches);
    let mut category: Vec<&str> = Vec::with_capacity(n_launches);

    for i in 0..n_launches {
        // Later flights use later boosters.
        let era = (i * BOOSTERS.len() / n_launches).min(BOOSTERS.len() - 1);
        let (cat, prefix, p_success, max_payload) = BOOSTERS[era];

        flight.push(i as i64 + 1);
        site.push(*rng.pick(&SITES));
        // Round to whole kilograms like the source data.
        payload.push((rng.next_f64() * max_payload).round());
        class.push(i64::from(rng.next_f64() < p_success));
        version.push(format!("{prefix} B{:04}", 1000 + i));
        category.push(cat);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_FLIGHT_NUMBER, DataType::Int64, false),
        Field::new(COL_SITE, DataType::Utf8, false),
        Field::new(COL_CLASS, DataType::Int64, false),
        Field::new(COL_PAYLOAD, DataType::Float64, false),
        Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
        Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(flight)),
            Arc::new(StringArray::from(site)),
            Arc::new(Int64Array::from(class)),
            Arc::new(Float64Array::from(payload)),
            Arc::new(StringArray::from(version)),
            Arc::new(StringArray::from(category)),
        ],
    )
    .context("building record batch")?;

    let output_path = "sample_launches.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    println!("Wrote {n_launches} launches to {output_path}");
    Ok(())
}
