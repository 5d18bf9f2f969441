//! A quick tour: parse a nested querystring, read typed values, change the
//! tree and write it back out.
//!
//! Parsing is traced at `TRACE`, so each decoded key shows up in the log.

use qrystr::{Config, Qs, Value};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let raw = "name=Acme&address[city]=Carrot+City&address[postcode]=12345&\
               user_ids[]=1&user_ids[]=2&user_ids[]=3&deep[a][b][c][d][e]=x";
    let qs = Qs::new(raw).expect("valid querystring");

    println!("raw:       {}", qs.raw_query());
    println!("name:      {}", qs.get_string(&["name"]));
    println!("city:      {}", qs.get_string(&["address", "city"]));
    println!("postcode:  {}", qs.get_int(&["address", "postcode"]));
    println!("user_ids:  {:?}", qs.get_all_as::<u32, _>(&["user_ids"]));
    println!("capped:    {:?}", qs.get(&["deep", "a", "b", "c", "d", "[e]"]));
    println!("missing:   {:?}", qs.get(&["address", "street"]));

    qs.add(4, &["user_ids"]);
    qs.set(["Main St"], &["address", "street"]);
    qs.set([Value::Bool(true)], &["active"]);

    println!();
    println!("plain:     {qs}");
    println!("encoded:   {}", qs.to_encoded_string());

    let dotted = Config::new()
        .path_delimiter(".")
        .parse(raw)
        .expect("valid querystring");
    println!();
    println!("dotted:    {}", dotted.get_string(&["address.city"]));

    match Qs::new("broken[[key]=1") {
        Ok(_) => unreachable!(),
        Err(err) => println!("error:     {err}"),
    }
}
