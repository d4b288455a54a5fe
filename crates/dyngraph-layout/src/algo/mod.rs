pub mod fruchterman_reingold;
pub mod kamada_kawai;

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Stress majorization one node at a time, run per connected component, followed by
    /// component packing. The default.
    KamadaKawai(KamadaKawaiOptions),
    /// Spring-electrical simulation over the whole graph with a cooling temperature.
    FruchtermanReingold(FruchtermanReingoldOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::KamadaKawai(KamadaKawaiOptions::default())
    }
}

impl Algorithm {
    pub fn node_radius(&self) -> f64 {
        match self {
            Algorithm::KamadaKawai(opts) => opts.node_radius,
            Algorithm::FruchtermanReingold(opts) => opts.node_radius,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KamadaKawaiOptions {
    /// Nominal drawing radius of a node. Packing keeps a margin of twice this value inside each
    /// component rectangle.
    pub node_radius: f64,
    /// The ideal length of the longest shortest path is `base_length_factor * node_radius`.
    pub base_length_factor: f64,
    /// Convergence threshold on the energy gradient norm of a node.
    pub epsilon: f64,
    /// The outer and inner loops restart after `max_iterations_per_node * graph.len()`
    /// iterations without converging.
    pub max_iterations_per_node: usize,
    /// A component gives up once it has been restarted more than this many times.
    pub max_restarts: usize,
    /// Seed for restart positions and for separating coincident nodes.
    pub random_seed: u64,
}

impl Default for KamadaKawaiOptions {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            base_length_factor: 8.0,
            epsilon: 0.1,
            max_iterations_per_node: 100,
            max_restarts: 10,
            random_seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FruchtermanReingoldOptions {
    pub node_radius: f64,
    /// Number of sweeps is `iterations_per_node * graph.len()`.
    pub iterations_per_node: usize,
    /// Maximum displacement of a node during the first sweep.
    pub initial_temperature: f64,
    /// The temperature is multiplied by this factor after every sweep.
    pub cooling_factor: f64,
    pub random_seed: u64,
}

impl Default for FruchtermanReingoldOptions {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            iterations_per_node: 500,
            initial_temperature: 50.0,
            cooling_factor: 0.99,
            random_seed: 0,
        }
    }
}
