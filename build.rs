//! Embeds build metadata for `lipcue --verbose` diagnostics.
//!
//! Always emits `VERGEN_BUILD_DATE`. Dev builds also emit `VERGEN_GIT_SHA`;
//! builds with the `release` feature leave it out so the version string
//! stays clean. Outside a git checkout the SHA falls back to `unknown`.

use vergen_gitcl::{BuildBuilder, Emitter};

fn main() {
    let build = match BuildBuilder::default().build_date(true).build() {
        Ok(build) => build,
        Err(e) => {
            println!("cargo:warning=Failed to configure build info: {}", e);
            println!("cargo:rustc-env=VERGEN_BUILD_DATE=unknown");
            return;
        }
    };

    let mut emitter = Emitter::default();
    if let Err(e) = emitter.add_instructions(&build) {
        println!("cargo:warning=Failed to add build info: {}", e);
    }

    #[cfg(not(feature = "release"))]
    add_git_sha(&mut emitter);

    if let Err(e) = emitter.emit() {
        println!("cargo:warning=Failed to emit build info: {}", e);
        println!("cargo:rustc-env=VERGEN_BUILD_DATE=unknown");
    }
}

#[cfg(not(feature = "release"))]
fn add_git_sha(emitter: &mut Emitter) {
    use vergen_gitcl::GitclBuilder;

    let added = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(|e| e.to_string())
        .and_then(|git| {
            emitter
                .add_instructions(&git)
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
    if let Err(e) = added {
        println!("cargo:warning=No git info: {}", e);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
