//! Cover invariants from the command line
//!
//! Builds a cover from a two-row base permutation and one sheet permutation
//! per label (in alphabet order), then prints its singularities, stratum,
//! genus, deck group characters and isotypic H⁺ dimensions.
//!
//! ## Usage
//!
//! ```bash
//! cover_invariants --top "a a b" --bottom "b c c" --general \
//!     --perm "(1,2)" --perm "()" --perm "(1,2)"
//!
//! RUST_LOG=flat_covers=debug cover_invariants --top "a b" --bottom "b a" \
//!     --perm "(1,2,3)" --perm "(1,3,2)"
//! ```

use clap::Parser;
use flat_covers::{BasePermutation, CoverResult, LabelledPermutation};
use tracing_subscriber::EnvFilter;

/// Invariants of a finite cover of an interval exchange or linear involution
#[derive(Parser, Debug)]
#[command(name = "cover_invariants")]
#[command(about = "Invariants of a finite cover of a flat surface permutation", long_about = None)]
struct Args {
    /// Labels of the top row, space separated
    #[arg(long)]
    top: String,

    /// Labels of the bottom row, space separated
    #[arg(long)]
    bottom: String,

    /// Read the rows as a linear involution (labels may repeat on a row)
    #[arg(long)]
    general: bool,

    /// Sheet permutation in cycle notation, once per label in alphabet order
    #[arg(long = "perm", required = true)]
    perms: Vec<String>,

    /// Skip the deck group and isotypic decomposition
    #[arg(long)]
    no_characters: bool,
}

fn main() -> CoverResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let base = if args.general {
        LabelledPermutation::generalized(&args.top, &args.bottom)?
    } else {
        LabelledPermutation::iet(&args.top, &args.bottom)?
    };
    let cover = base.cover(args.perms.as_slice())?;

    println!("{cover}");
    println!();
    println!("Base stratum:   {}", cover.base_stratum());
    println!("Profile:        {:?}", cover.profile());
    println!("Stratum:        {}", cover.stratum());
    println!("Genus:          {}", cover.genus());
    println!("Orientable:     {}", cover.is_orientable());

    println!("\nSingularities:");
    for (k, orbit) in cover.interval_diagram().iter().enumerate() {
        let crossings: Vec<String> = orbit
            .iter()
            .map(|c| {
                format!(
                    "({}, {:?}, {})",
                    cover.base().alphabet().label(c.label),
                    c.sign,
                    c.sheet + 1
                )
            })
            .collect();
        println!("  {:>3}: {}", k, crossings.join(" "));
    }

    if args.no_characters {
        return Ok(());
    }

    let table = cover.real_characters()?;
    let dims = cover.isotypic_dimensions()?;
    println!("\nDeck group order: {}", table.order());
    println!("Real characters:  {}", table.len());
    for (i, (chi, dim)) in table.characters().iter().zip(&dims).enumerate() {
        let kind = if chi.is_paired() { "paired" } else { "real" };
        println!(
            "  χ{}: degree {} ({}), H⁺ dimension {}",
            i,
            chi.degree(),
            kind,
            dim
        );
        println!("      {chi}");
    }
    println!(
        "\nSum of isotypic dimensions: {} (genus {})",
        dims.iter().sum::<usize>(),
        cover.genus()
    );

    Ok(())
}
