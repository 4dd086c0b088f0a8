use serde_json::json;

/// Deterministic measurement noise, stepped with splitmix64.
///
/// Seeded, so repeated runs emit an identical database.
struct Jitter {
    state: u64,
}

impl Jitter {
    fn new(seed: u64) -> Self {
        Jitter { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform offset in [-spread, spread).
    fn offset(&mut self, spread: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * spread
    }
}

fn main() {
    let mut jitter = Jitter::new(42);

    // Base chromaticity per model, near the Planckian locus, plus the emitter
    // swaps and brightness levels each model was measured at.
    let models: Vec<(&str, &str, &str, (f64, f64), Vec<(&str, &str)>)> = vec![
        (
            "TS10",
            "active",
            "stock",
            (0.3418, 0.3518),
            vec![("og", "1-150"), ("og", "2-400"), ("sw45", "1-150"), ("sw45", "2-400")],
        ),
        (
            "PL47MU",
            "active",
            "modded",
            (0.3604, 0.3339),
            vec![("og", "1-90"), ("sw45k", "2-220")],
        ),
        (
            "FC11",
            "retired",
            "stock",
            (0.3805, 0.3768),
            vec![("og", "3-900")],
        ),
    ];

    let mut flashlights = Vec::new();
    let mut id = 1;
    for (model, status, configuration, (bx, by), measures) in &models {
        let recs: Vec<_> = measures
            .iter()
            .enumerate()
            .map(|(i, (mod_tag, level))| {
                json!({
                    "date": format!("2022-07-{:02}", 21 + i),
                    "mod": mod_tag,
                    "level": level,
                    "ciex": ((bx + jitter.offset(0.004)) * 1e4).round() / 1e4,
                    "ciey": ((by + jitter.offset(0.004)) * 1e4).round() / 1e4,
                })
            })
            .collect();

        flashlights.push(json!({
            "id": format!("{id:03}"),
            "model": model,
            "status": status,
            "configuration": configuration,
            "measures": recs,
        }));
        id += 1;
    }

    let db = json!({
        "version": "0.0.1",
        "flashlights": flashlights,
    });

    let output_path = "sotc.json";
    let text = serde_json::to_string_pretty(&db).expect("Failed to serialize database");
    std::fs::write(output_path, text).expect("Failed to create output file");

    println!("Wrote {} flashlights to {output_path}", models.len());
}
