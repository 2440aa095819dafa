use sudokugen::generate;

fn main() {
    env_logger::init();
    let puzzle = generate(30, 1_000).expect("parameters are within the supported range");
    println!("{}", puzzle.board());
    println!("Number of clues: {}", puzzle.num_clues());
}
