fn main() {
    let code = match rdf2json_cli::run() {
        Ok(()) => rdf2json_cli::exit_code::SUCCESS,
        Err(err) => rdf2json_cli::report(&err),
    };
    std::process::exit(code);
}
