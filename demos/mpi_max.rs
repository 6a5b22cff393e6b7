use clap::Parser;
use log::info;
use matmax::communication::Communicator;
use matmax::communication::SizedCommunicator;
use matmax::communication::MPI_UNIVERSE;
use matmax::max::DistributedMax;
use matmax::max::SequentialMax;
use matmax::reduce;
use matmax::task::InputBuffer;
use matmax::task::TaskData;
use matmax::task::TaskPipeline;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

// This is effectively an MPI test written as an example, since a
// binary built by cargo test cannot be launched once per rank under
// mpirun. Run it with
//   mpirun -n <ranks> cargo run --features mpi --example mpi_max

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Options {
    #[clap(long, default_value_t = 200)]
    rows: i32,
    #[clap(long, default_value_t = 300)]
    cols: i32,
    #[clap(long, default_value_t = 1337)]
    seed: u64,
}

fn main() {
    let options = Options::parse();
    let shape_comm = Communicator::<i32>::new();
    let element_comm = Communicator::<f64>::new();
    let is_main = element_comm.is_main();
    if is_main {
        simplelog::TermLogger::init(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
        .unwrap();
    }
    let dimensions = [options.rows, options.cols];
    let elements = if is_main {
        generate_matrix(&options)
    } else {
        vec![]
    };
    let mut result = [0.0];
    let mut data = TaskData::new();
    if is_main {
        data.push_input(InputBuffer::Dimensions(&dimensions));
        data.push_input(InputBuffer::Elements(&elements));
        data.push_output(&mut result);
    }
    let mut pipeline = TaskPipeline::new(DistributedMax::new(data, shape_comm, element_comm));
    assert!(pipeline.execute());
    drop(pipeline);
    if is_main {
        let expected = sequential_max(&dimensions, &elements);
        assert_eq!(result[0], expected);
        assert_eq!(Some(result[0]), reduce::max_element(&elements));
        info!(
            "distributed maximum {} matches the sequential result",
            result[0]
        );
    }
    MPI_UNIVERSE.drop();
}

fn generate_matrix(options: &Options) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    (0..options.rows as usize * options.cols as usize)
        .map(|_| rng.gen_range(-1.0e5..1.0e5))
        .collect()
}

fn sequential_max(dimensions: &[i32], elements: &[f64]) -> f64 {
    let mut expected = [0.0];
    let mut data = TaskData::new();
    data.push_input(InputBuffer::Dimensions(dimensions));
    data.push_input(InputBuffer::Elements(elements));
    data.push_output(&mut expected);
    let mut pipeline = TaskPipeline::new(SequentialMax::new(data));
    assert!(pipeline.execute());
    drop(pipeline);
    expected[0]
}
