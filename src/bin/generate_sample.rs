use anyhow::{Context, Result};
use bank_dashboard::DashboardConfig;

const ROWS: usize = 4000;

const HEADER: [&str; 21] = [
    "age",
    "job",
    "marital",
    "education",
    "default",
    "housing",
    "loan",
    "contact",
    "month",
    "day_of_week",
    "duration",
    "campaign",
    "pdays",
    "previous",
    "poutcome",
    "emp.var.rate",
    "cons.price.idx",
    "cons.conf.idx",
    "euribor3m",
    "nr.employed",
    "y",
];

const WORKING_JOBS: [(&str, f64); 10] = [
    ("admin.", 0.25),
    ("blue-collar", 0.22),
    ("technician", 0.17),
    ("services", 0.10),
    ("management", 0.07),
    ("entrepreneur", 0.04),
    ("self-employed", 0.04),
    ("housemaid", 0.03),
    ("unemployed", 0.03),
    ("unknown", 0.01),
];

const EDUCATION: [(&str, f64); 7] = [
    ("university.degree", 0.30),
    ("high.school", 0.23),
    ("basic.9y", 0.15),
    ("professional.course", 0.13),
    ("basic.4y", 0.10),
    ("basic.6y", 0.06),
    ("unknown", 0.03),
];

/// Economic context per campaign period:
/// (month, emp.var.rate, cons.price.idx, cons.conf.idx, euribor3m, nr.employed)
const PERIODS: [(&str, f64, f64, f64, f64, f64); 6] = [
    ("may", 1.1, 93.994, -36.4, 4.857, 5191.0),
    ("jun", 1.4, 94.465, -41.8, 4.961, 5228.1),
    ("jul", 1.4, 93.918, -42.7, 4.962, 5228.1),
    ("aug", 1.4, 93.444, -36.1, 4.964, 5228.1),
    ("nov", -0.1, 93.200, -42.0, 4.021, 5195.8),
    ("apr", -1.8, 93.075, -47.1, 1.405, 5099.1),
];

const DAYS: [&str; 5] = ["mon", "tue", "wed", "thu", "fri"];

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Pick from `(value, weight)` pairs; weights need not sum to one.
    fn weighted<'a>(&mut self, items: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = items.iter().map(|i| i.1).sum();
        let mut target = self.next_f64() * total;
        for &(value, weight) in items {
            if target < weight {
                return value;
            }
            target -= weight;
        }
        items[items.len() - 1].0
    }
}

fn yes_no(rng: &mut SimpleRng, p_yes: f64) -> &'static str {
    if rng.chance(p_yes) {
        "yes"
    } else {
        "no"
    }
}

fn customer(rng: &mut SimpleRng) -> Vec<String> {
    let age = rng.gauss(40.0, 10.5).round().clamp(17.0, 98.0) as i64;

    let job = if age >= 60 && rng.chance(0.7) {
        "retired"
    } else if age <= 25 && rng.chance(0.4) {
        "student"
    } else {
        rng.weighted(&WORKING_JOBS)
    };

    let marital = if age < 28 && rng.chance(0.6) {
        "single"
    } else {
        rng.weighted(&[
            ("married", 0.65),
            ("single", 0.22),
            ("divorced", 0.12),
            ("unknown", 0.01),
        ])
    };

    let (month, emp_var, price_idx, conf_idx, euribor, employed) =
        PERIODS[(rng.next_u64() % PERIODS.len() as u64) as usize];

    let duration = (-rng.next_f64().max(1e-9).ln() * 250.0).round() as i64;
    let campaign = 1 + (-rng.next_f64().max(1e-9).ln() * 1.6).floor() as i64;
    let contacted_before = rng.chance(0.04);
    let pdays = if contacted_before {
        (rng.next_u64() % 27) as i64
    } else {
        999
    };
    let previous = if contacted_before {
        1 + (rng.next_u64() % 3) as i64
    } else if rng.chance(0.1) {
        1
    } else {
        0
    };
    let poutcome = match (previous, contacted_before) {
        (0, _) => "nonexistent",
        (_, true) => "success",
        _ => "failure",
    };

    // longer calls and a weaker labour market both raise the odds of a deposit
    let repeat_bonus = if contacted_before { 0.4 } else { 0.0 };
    let p_yes =
        (duration as f64 / 2000.0 + (1.5 - emp_var) * 0.05 + repeat_bonus).clamp(0.01, 0.95);
    let default = if rng.chance(0.2) { "unknown" } else { "no" };

    vec![
        age.to_string(),
        job.to_string(),
        marital.to_string(),
        rng.weighted(&EDUCATION).to_string(),
        default.to_string(),
        yes_no(rng, 0.53).to_string(),
        yes_no(rng, 0.16).to_string(),
        rng.pick(&["cellular", "telephone"]).to_string(),
        month.to_string(),
        rng.pick(&DAYS).to_string(),
        duration.to_string(),
        campaign.to_string(),
        pdays.to_string(),
        previous.to_string(),
        poutcome.to_string(),
        emp_var.to_string(),
        format!("{price_idx:.3}"),
        conf_idx.to_string(),
        format!("{:.3}", euribor + rng.gauss(0.0, 0.01)),
        employed.to_string(),
        yes_no(rng, p_yes).to_string(),
    ]
}

fn main() -> Result<()> {
    let config = DashboardConfig::default();
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_path(&config.data_path)
        .with_context(|| format!("creating {}", config.data_path.display()))?;

    writer.write_record(HEADER).context("writing header")?;
    for _ in 0..ROWS {
        writer
            .write_record(customer(&mut rng))
            .context("writing customer row")?;
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {ROWS} customers ({} columns) to {}",
        HEADER.len(),
        config.data_path.display()
    );
    Ok(())
}
