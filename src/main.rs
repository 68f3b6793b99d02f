use arityc::compiler::driver::compile;

fn main() {
    env_logger::init();
    std::process::exit(compile(std::env::args().collect()));
}
