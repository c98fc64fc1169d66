use std::env;

fn main() {
    // ROCKETSHOES_API_URL をビルド時のAPI既定値として埋め込む
    match env::var("ROCKETSHOES_API_URL") {
        Ok(url) if !url.trim().is_empty() => {
            let url = url.trim().trim_end_matches('/');
            println!("cargo:warning=CART_API_URL set to {}", url);
            println!("cargo:rustc-env=CART_API_URL={}", url);
        }
        _ => {
            println!("cargo:warning=ROCKETSHOES_API_URL not set, using built-in default");
        }
    }

    // 環境変数変更時に再ビルド
    println!("cargo:rerun-if-env-changed=ROCKETSHOES_API_URL");
}
