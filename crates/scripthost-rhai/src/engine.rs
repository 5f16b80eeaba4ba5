use rhai::{
    Engine, OptimizationLevel,
    packages::{Package, StandardPackage},
};
use scripthost_core::CompilerFlags;
use tracing::{debug, info};

use crate::config::RhaiConfig;

pub(crate) fn build_engine(config: &RhaiConfig, flags: CompilerFlags) -> Engine {
    let mut engine = Engine::new_raw();
    engine.register_global_module(StandardPackage::new().as_shared_module());

    engine.set_strict_variables(config.strict_variables);
    engine.set_fail_on_invalid_map_property(true);

    engine.set_max_operations(config.max_operations);
    engine.set_max_call_levels(config.max_call_levels);
    engine.set_max_expr_depths(config.max_expr_depth, config.max_function_expr_depth);
    engine.set_max_string_size(config.max_string_size);
    engine.set_max_array_size(config.max_array_size);
    engine.set_max_map_size(config.max_map_size);
    engine.set_max_variables(config.max_variables);
    engine.set_max_functions(config.max_functions);
    engine.set_max_modules(config.max_modules);

    // Unoptimized ASTs keep every statement where it was written.
    if flags.contains(CompilerFlags::INCLUDE_DEBUG_INFO) {
        engine.set_optimization_level(OptimizationLevel::None);
    } else {
        engine.set_optimization_level(OptimizationLevel::Simple);
    }

    engine.on_print(|text| info!(target: "scripthost::script", "{text}"));
    engine.on_debug(|text, source, pos| {
        debug!(target: "scripthost::script", source = source.unwrap_or("script"), line = pos.line().unwrap_or(0), "{text}")
    });

    engine
}
