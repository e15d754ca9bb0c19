use conreq::error::AppResult;

fn main() -> AppResult<()> {
    conreq::entry::run()
}
