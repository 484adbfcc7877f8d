//! Cluster a headerless numeric CSV file and print the assignments.
//!
//! ```text
//! cargo run --example cluster_csv -- data/jain.csv --eps 2.5 --min-points 2 --cluster-dim 2
//! ```

use std::path::PathBuf;

use clap::Parser;
use densecan::{ClusterId, Dbscan, DbscanParams, PointStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cluster_csv")]
#[command(about = "DBSCAN over the rows of a numeric CSV file")]
struct Args {
    /// CSV file, one point per row, no header
    path: PathBuf,

    /// Neighborhood radius
    #[arg(long, default_value_t = 2.5)]
    eps: f64,

    /// Minimum neighborhood size of a core point
    #[arg(long, default_value_t = 2)]
    min_points: usize,

    /// Leading coordinates used for distances (all when omitted)
    #[arg(long)]
    cluster_dim: Option<usize>,

    /// Count the point itself toward its neighborhood size
    #[arg(long)]
    count_self: bool,
}

fn read_rows(path: &PathBuf) -> Result<Vec<Vec<f64>>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(rows)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();

    let rows = read_rows(&args.path)?;
    let store = PointStore::load(rows)?;
    info!(
        rows = store.n_rows(),
        points = store.len(),
        dim = store.dim(),
        "loaded {}",
        args.path.display()
    );

    let dbscan = Dbscan::from_params(DbscanParams {
        eps: args.eps,
        min_points: args.min_points,
        cluster_dim: args.cluster_dim,
        count_self: args.count_self,
    });
    let result = dbscan.fit(&store)?;

    println!(" [+] Total Number of Clusters: {}\n", result.n_clusters());
    println!("{:>10} | coordinates", "Cluster ID");
    for cluster in result.clusters() {
        for coords in result.coordinates(&store, cluster)? {
            let shown: Vec<String> = coords.iter().map(|c| format!("{c:8.3}")).collect();
            println!("{:>10} | {}", cluster.id(), shown.join(" "));
        }
    }

    if let Some(noise) = result.cluster(ClusterId::Noise) {
        info!(noise = noise.len(), "points left as noise");
    }
    Ok(())
}
