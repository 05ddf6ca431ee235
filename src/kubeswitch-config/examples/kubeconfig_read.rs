use kubeswitch_config::KubeConfig;

fn main() {
    // Resolve the KUBECONFIG file list, merge and dump the result
    let config = KubeConfig::load().expect("load failed");

    println!("current context: {}", config.current_context);
    for context in &config.contexts {
        println!("{}: namespace {}", context.name, context.context.namespace());
    }
}
