use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct Fleet {
    manufacturer: &'static str,
    model: &'static str,
    capacity_kw: f64,
}

struct Site {
    name: &'static str,
    latitude: f64,
    longitude: f64,
    commissioned: i32,
    turbines: usize,
}

/// Normal draw via the Box-Muller transform.
fn gauss(rng: &mut StdRng, mean: f64, sigma: f64) -> f64 {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    let z = (-2.0_f64 * u1.ln()).sqrt() * (2.0_f64 * std::f64::consts::PI * u2).cos();
    mean + sigma * z
}

fn main() {
    // Fixed seed keeps the sample file identical from run to run.
    let mut rng = StdRng::seed_from_u64(42);

    let fleets = [
        Fleet { manufacturer: "Vestas", model: "V80-1.8", capacity_kw: 1800.0 },
        Fleet { manufacturer: "Vestas", model: "V90-3.0", capacity_kw: 3000.0 },
        Fleet { manufacturer: "Siemens", model: "SWT-2.3-101", capacity_kw: 2300.0 },
        Fleet { manufacturer: "GE", model: "1.5 SLE", capacity_kw: 1500.0 },
        Fleet { manufacturer: "Enercon", model: "E-82", capacity_kw: 2050.0 },
    ];

    let sites = [
        Site { name: "Summerview", latitude: 49.57, longitude: -113.86, commissioned: 2004, turbines: 38 },
        Site { name: "Wolfe Island", latitude: 44.18, longitude: -76.43, commissioned: 2009, turbines: 30 },
        Site { name: "Box Springs", latitude: 50.07, longitude: -110.72, commissioned: 2013, turbines: 24 },
        Site { name: "North Cape", latitude: 47.06, longitude: -63.99, commissioned: 2001, turbines: 16 },
    ];

    let output_path = "turbine_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Turbine identifier",
            "Turbine rated capacity (kW)",
            "Commissioning date",
            "Manufacturer",
            "Model",
            "Latitude",
            "Longitude",
            "Project name",
        ])
        .expect("Failed to write header");

    let mut turbine_no: usize = 0;
    for site in &sites {
        let fleet = &fleets[rng.random_range(0..fleets.len())];

        for _ in 0..site.turbines {
            turbine_no += 1;
            let identifier = format!("CWTD-{turbine_no:04}");

            // Roughly one cell in twenty-five goes missing, spread over the
            // three columns the cleaner repairs most often.
            let capacity = if rng.random::<f64>() < 0.04 {
                String::new()
            } else {
                format!("{}", fleet.capacity_kw)
            };
            let date = if rng.random::<f64>() < 0.04 {
                String::new()
            } else if rng.random::<f64>() < 0.15 {
                // Some records only carry the commissioning year.
                format!("{}", site.commissioned)
            } else {
                let month: u32 = rng.random_range(1..=12);
                let day: u32 = rng.random_range(1..=28);
                format!("{}-{month:02}-{day:02}", site.commissioned)
            };
            let model = if rng.random::<f64>() < 0.04 {
                String::new()
            } else {
                fleet.model.to_string()
            };

            let latitude = format!("{:.5}", gauss(&mut rng, site.latitude, 0.03));
            let longitude = format!("{:.5}", gauss(&mut rng, site.longitude, 0.04));

            writer
                .write_record([
                    identifier.as_str(),
                    capacity.as_str(),
                    date.as_str(),
                    fleet.manufacturer,
                    model.as_str(),
                    latitude.as_str(),
                    longitude.as_str(),
                    site.name,
                ])
                .expect("Failed to write row");
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {turbine_no} turbines to {output_path}");
}
