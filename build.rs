use sundials_sys as s;

fn main() {
    println!("cargo::rustc-check-cfg=cfg(sundials_major, \
              values(\"5\", \"6\", \"7\", \"8\"))");
    println!("cargo::rustc-check-cfg=cfg(sundials_minor, values(any()))");
    println!("cargo:rustc-cfg=sundials_major=\"{}\"",
             s::SUNDIALS_VERSION_MAJOR);
    println!("cargo:rustc-cfg=sundials_minor=\"{}\"",
             s::SUNDIALS_VERSION_MINOR);
    if s::SUNDIALS_VERSION_MAJOR < 6 {
        panic!("sundials-ivp requires Sundials ≥ 6 (found {}.{})",
               s::SUNDIALS_VERSION_MAJOR, s::SUNDIALS_VERSION_MINOR);
    }
}
