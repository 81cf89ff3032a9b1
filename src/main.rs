fn main() {
    if let Err(e) = csvlatex::run_csvlatex(std::env::args_os().skip(1)) {
        println!("{e}");
        std::process::exit(1);
    }
}
