use std::path::PathBuf;

use anstream::eprintln;
use anstream::println;
use clap::Parser;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use thousands::Separable;

use pathsearch::algorithms::astar::AStarSearch;
use pathsearch::algorithms::astar::StepResult;
use pathsearch::data_structures::frontier::Discipline;
use pathsearch::problems::grid::ChebyshevDistance;
use pathsearch::problems::grid::DEMO_MAZE;
use pathsearch::problems::grid::EuclideanDistance;
use pathsearch::problems::grid::GridHeuristic;
use pathsearch::problems::grid::GridProblem;
use pathsearch::problems::romania;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DisciplineArg {
    Fifo,
    Lifo,
    Priority,
    All,
}

impl DisciplineArg {
    fn disciplines(&self) -> &'static [Discipline] {
        match self {
            DisciplineArg::Fifo => &[Discipline::Fifo],
            DisciplineArg::Lifo => &[Discipline::Lifo],
            DisciplineArg::Priority => &[Discipline::Priority],
            DisciplineArg::All => &Discipline::ALL,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum HeuristicArg {
    Euclidean,
    Chebyshev,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = pathsearch::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// City to leave from on the Romania map
    #[arg(long, env = "PATHSEARCH_START", default_value = "Bu")]
    start: String,
    /// City to arrive to on the Romania map
    #[arg(long, env = "PATHSEARCH_GOAL", default_value = "Ti")]
    goal: String,
    #[arg(long, env = "PATHSEARCH_DISCIPLINE", value_enum, default_value_t = DisciplineArg::All)]
    discipline: DisciplineArg,

    /// Text maze with `S`, `G`, `#` and `.` cells. Defaults to a built-in 20x20 map.
    #[arg(long, env = "PATHSEARCH_MAZE")]
    maze: Option<PathBuf>,
    #[arg(long, env = "PATHSEARCH_HEURISTIC", value_enum, default_value_t = HeuristicArg::Euclidean)]
    heuristic: HeuristicArg,
    /// Gives up on the maze after this many A* steps
    #[arg(long, env = "PATHSEARCH_MAX_STEPS", default_value_t = 10_000usize)]
    max_steps: usize,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn romania(args: &Args) {
    let map = romania::map();
    println!("{}", "* Romania".bold());
    println!("{map}");

    for discipline in args.discipline.disciplines() {
        let name = discipline.search_name();
        match map.search(&args.start, &args.goal, *discipline) {
            Ok(path) => println!("{}: {path}", name.green()),
            Err(e) => eprintln!("{}: {e}", name.red()),
        }
    }
}

fn maze<H: GridHeuristic>(problem: &GridProblem, max_steps: usize) -> std::io::Result<()> {
    println!("{}", "* Maze".bold());
    println!("{problem}");

    let search = AStarSearch::<H>::with_heuristic(problem.grid(), problem.start(), problem.goal());
    let mut search = match search {
        Ok(search) => search,
        Err(e) => {
            eprintln!("{}: {e}", "A*".red());
            return Ok(());
        }
    };

    for (i, step) in search.by_ref().take(max_steps).enumerate() {
        match step {
            Ok(StepResult::Searching { open, closed }) => {
                log::info!(
                    "Step {}: |open|={}, |closed|={}",
                    (i + 1).separate_with_commas(),
                    open.len().separate_with_commas(),
                    closed.len().separate_with_commas()
                );
            }
            Ok(StepResult::Done { path }) => {
                println!("{}: {path}", "A*".green());
                println!("{}", problem.render_path(path.states()));
            }
            Err(e) => eprintln!("{}: {e}", "A*".red()),
        }
    }
    if !search.is_finished() {
        eprintln!(
            "{}: gave up after {} steps",
            "A*".yellow(),
            max_steps.separate_with_commas()
        );
    }
    search.write_stats(std::io::stdout())
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    args.color.write_global();

    romania(&args);

    let maze_str = match &args.maze {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEMO_MAZE.to_string(),
    };
    let problem = GridProblem::try_from(maze_str.as_str()).map_err(std::io::Error::other)?;

    match args.heuristic {
        HeuristicArg::Euclidean => maze::<EuclideanDistance>(&problem, args.max_steps),
        HeuristicArg::Chebyshev => maze::<ChebyshevDistance>(&problem, args.max_steps),
    }
}
