//! Plans an edge-covering tour of a lattice and prints it one cell per line.
//!
//! Usage:
//!   cargo run --example grid_tour
//!   cargo run --example grid_tour -- --rows 6 --cols 12 --start 0,3 --finish 5,9 -vv
//!   cargo run --example grid_tour -- --show-bands --timings

mod inner {
    use std::process;

    use clap::Parser;
    use latticewalk::{
        Coord, Lattice, TourConfig, TourError, balance::balance, band::decompose, plan_tour,
        tracing_support::{dump_stage_timings, init_tracing},
    };
    use tracing::Level;

    /// Plan a tour that walks every edge of a rows x cols lattice at least
    /// once, starting at one cell and finishing at another.
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        #[arg(long, default_value_t = 5)]
        rows: usize,

        #[arg(long, default_value_t = 10)]
        cols: usize,

        /// Start cell as `row,col`
        #[arg(long, default_value = "1,2")]
        start: Coord,

        /// Finish cell as `row,col`; must lie in a column right of the start
        #[arg(long, default_value = "3,7")]
        finish: Coord,

        /// Print each balanced band's adjacency before the tour
        #[arg(long)]
        show_bands: bool,

        /// Print time spent in each planning stage to stderr
        #[arg(long)]
        timings: bool,

        /// Log more (-v info, -vv debug, -vvv trace)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    }

    pub fn run() {
        let args = Args::parse();
        init_tracing(match args.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        });

        let config = TourConfig {
            rows: args.rows,
            cols: args.cols,
            start: args.start,
            finish: args.finish,
        };

        if args.show_bands {
            if let Err(err) = print_bands(&config) {
                exit_with(err);
            }
        }

        let tour = match plan_tour(&config) {
            Ok(tour) => tour,
            Err(err) => exit_with(err),
        };

        println!("Start: {}", config.start);
        println!("End: {}", config.finish);
        for report in tour.bands() {
            println!("{}", report.diagnostic());
        }
        println!(
            "Optimized euler trail with minimum backtracking: {}",
            tour.walk().len()
        );
        for coord in tour.coords() {
            println!("{coord}");
        }

        if args.timings {
            dump_stage_timings();
        }
    }

    fn print_bands(config: &TourConfig) -> Result<(), TourError> {
        config.validate()?;
        let lattice = Lattice::new(config.rows, config.cols)?;
        let bands = decompose(&lattice, config.start, config.finish)?;
        for mut band_graph in [bands.start, bands.middle, bands.finish] {
            let report = balance(&mut band_graph, &lattice)?;
            let band = band_graph.band();
            let (lo, hi) = band.columns();
            println!(
                "{} band, columns {lo}-{hi}: {} edges ({} duplicated)",
                band.kind(),
                report.total_edges(),
                report.duplicated_edges()
            );
            print!("{}", band_graph.graph());
            println!();
        }
        Ok(())
    }

    fn exit_with(err: TourError) -> ! {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn main() {
    inner::run();
}
