//! Writes a synthetic `movies_metadata.csv` with the columns the dashboard
//! expects, including the dirty cells real dumps contain (non-numeric
//! budgets, blank taglines, empty country lists).

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a, T>(&mut self, items: &'a [(T, f64)]) -> &'a T {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for (item, w) in items {
            if roll < *w {
                return item;
            }
            roll -= w;
        }
        &items[items.len() - 1].0
    }
}

const LANGUAGES: [(&str, f64); 10] = [
    ("en", 60.0),
    ("fr", 8.0),
    ("it", 5.0),
    ("ja", 5.0),
    ("de", 4.0),
    ("es", 4.0),
    ("ru", 3.0),
    ("hi", 2.5),
    ("ko", 2.0),
    ("zh", 1.5),
];

const COUNTRIES: [((&str, &str), f64); 8] = [
    (("US", "United States of America"), 55.0),
    (("GB", "United Kingdom"), 10.0),
    (("FR", "France"), 9.0),
    (("DE", "Germany"), 6.0),
    (("JP", "Japan"), 5.0),
    (("IT", "Italy"), 5.0),
    (("CA", "Canada"), 5.0),
    (("IN", "India"), 3.0),
];

const TAGLINES: [&str; 6] = [
    "Go big.",
    "The night is darker than you think.",
    "One last job.",
    "Nobody walks away.",
    "Some doors should stay closed.",
    "Home is where the fight is.",
];

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_movies = 2000;
    let output_path = "movies_metadata.csv";

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "budget",
            "revenue",
            "popularity",
            "vote_average",
            "runtime",
            "original_language",
            "original_title",
            "belongs_to_collection",
            "tagline",
            "production_countries",
        ])
        .expect("Failed to write header");

    for i in 0..n_movies {
        let in_collection = rng.chance(0.12);
        let budget = (rng.gauss(16.0, 1.4).exp()).max(0.0).round();
        let boost = if in_collection { 1.8 } else { 1.0 };
        let revenue = (budget * boost * rng.gauss(1.6, 0.9).max(0.0)).round();
        let popularity = rng.gauss(1.5, 0.9).exp();
        let vote_average = (rng.gauss(6.1, 1.1).clamp(0.0, 10.0) * 10.0).round() / 10.0;
        let runtime = rng.gauss(100.0, 22.0).max(1.0).round();

        // A share of rows carries the junk a real dump has.
        let budget_cell = if rng.chance(0.01) {
            "/ff9qCepilowshEtG2GYWwzt2bs4.jpg".to_string()
        } else {
            budget.to_string()
        };
        let runtime_cell = if rng.chance(0.02) {
            String::new()
        } else {
            runtime.to_string()
        };

        let collection = if in_collection {
            format!("{{'id': {}, 'name': 'Saga {} Collection'}}", 1000 + i, i % 50)
        } else {
            String::new()
        };
        let tagline = if rng.chance(0.55) {
            TAGLINES[(rng.next_u64() % TAGLINES.len() as u64) as usize].to_string()
        } else if rng.chance(0.05) {
            "  ".to_string()
        } else {
            String::new()
        };
        let countries = if rng.chance(0.05) {
            "[]".to_string()
        } else {
            let (iso, name) = rng.weighted(&COUNTRIES);
            format!("[{{'iso_3166_1': '{iso}', 'name': '{name}'}}]")
        };

        writer
            .write_record([
                budget_cell,
                revenue.to_string(),
                format!("{popularity:.6}"),
                vote_average.to_string(),
                runtime_cell,
                rng.weighted(&LANGUAGES).to_string(),
                format!("Movie {i:04}"),
                collection,
                tagline,
                countries,
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_movies} movies to {output_path}");
}
