//! Script Synthesizer.
//!
//! Renders the component index, project context and options into the
//! self-contained browser runtime that the host emits as an asset. All
//! data is baked in as literals; the script fetches nothing at runtime.
//!
//! The generated runtime follows the same algorithm as [`crate::runtime`]:
//! introspection strategies tried in priority order, a DOM climb on miss,
//! and a controller object owning the single click listener.

use serde::{Deserialize, Serialize};

use crate::config::{LocatorOptions, TriggerKey};
use crate::index::{ComponentIndex, ProjectContext};
use crate::utils;
use crate::LocatorError;

/// Global holding the published component index.
pub const INDEX_GLOBAL: &str = "__COMPONENT_LOCATOR__";
/// Global holding the published project root.
pub const CONTEXT_GLOBAL: &str = "__COMPONENT_LOCATOR_CONTEXT__";
/// Global re-initialize entry point.
pub const REINIT_GLOBAL: &str = "__REINIT_COMPONENT_LOCATOR__";
/// Global cleanup entry point.
pub const CLEANUP_GLOBAL: &str = "__CLEANUP_COMPONENT_LOCATOR__";

/// A synthesized script ready to be handed to the host's asset registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedScript {
    pub file_name: String,
    pub source: String,
}

impl EmittedScript {
    /// Byte length of the source.
    pub fn size(&self) -> usize {
        self.source.len()
    }
}

/// JS expression evaluating the trigger condition against `event`.
pub fn trigger_condition_js(key: TriggerKey) -> &'static str {
    match key {
        TriggerKey::Ctrl => "event.ctrlKey",
        TriggerKey::Cmd => "event.metaKey",
        TriggerKey::Both => "event.ctrlKey || event.metaKey",
    }
}

/// Render the runtime script text.
pub fn synthesize_script(
    index: &ComponentIndex,
    context: &ProjectContext,
    opts: &LocatorOptions,
) -> Result<String, LocatorError> {
    let index_literal = utils::to_js_literal(index)?;
    let context_literal = utils::to_js_literal(context)?;

    let script = RUNTIME_TEMPLATE
        .replace("__LOCATOR_INDEX_GLOBAL__", INDEX_GLOBAL)
        .replace("__LOCATOR_CONTEXT_GLOBAL__", CONTEXT_GLOBAL)
        .replace("__LOCATOR_REINIT_GLOBAL__", REINIT_GLOBAL)
        .replace("__LOCATOR_CLEANUP_GLOBAL__", CLEANUP_GLOBAL)
        .replace(
            "__LOCATOR_TRIGGER__",
            trigger_condition_js(opts.trigger_key),
        )
        .replace(
            "__LOCATOR_EDITOR__",
            &format!("\"{}\"", utils::escape_js_string(opts.editor.as_str())),
        )
        .replace(
            "__LOCATOR_HOT_UPDATE__",
            &format!("\"{}\"", utils::escape_js_string(&opts.hot_update_global)),
        )
        .replace("__LOCATOR_VERBOSE__", if opts.verbose { "true" } else { "false" })
        // Data literals last so their content is never re-scanned for tokens.
        .replace("__LOCATOR_CONTEXT__", &context_literal)
        .replace("__LOCATOR_INDEX__", &index_literal);

    tracing::debug!(
        bytes = script.len(),
        components = index.len(),
        trigger = opts.trigger_key.as_str(),
        editor = %opts.editor,
        "runtime script synthesized"
    );

    Ok(script)
}

/// Render the runtime script and wrap it under the configured asset name.
pub fn emit_script(
    index: &ComponentIndex,
    context: &ProjectContext,
    opts: &LocatorOptions,
) -> Result<EmittedScript, LocatorError> {
    Ok(EmittedScript {
        file_name: opts.asset_file_name.clone(),
        source: synthesize_script(index, context, opts)?,
    })
}

const RUNTIME_TEMPLATE: &str = r#"// === COMPONENT LOCATOR RUNTIME ===
// Generated at build time. Do not edit.
(function (global) {
  'use strict';

  var COMPONENT_INDEX = __LOCATOR_INDEX__;
  var PROJECT_CONTEXT = __LOCATOR_CONTEXT__;
  var EDITOR = __LOCATOR_EDITOR__ || 'vscode';
  var HOT_UPDATE_GLOBAL = __LOCATOR_HOT_UPDATE__;
  var VERBOSE = __LOCATOR_VERBOSE__;

  function log() {
    if (VERBOSE && global.console) {
      global.console.log.apply(global.console, arguments);
    }
  }

  function isTrigger(event) {
    return !!(__LOCATOR_TRIGGER__);
  }

  // Introspection strategies, tried in priority order.
  var strategies = [
    {
      name: 'instance-chain',
      probe: function (element) {
        var instance = element.__vueParentComponent;
        while (instance) {
          if (instance.type && instance.type.__file) {
            return instance.type.__file;
          }
          instance = instance.parent;
        }
        return null;
      }
    },
    {
      name: 'options-file',
      probe: function (element) {
        var instance = element.__vue__;
        return (instance && instance.$options && instance.$options.__file) || null;
      }
    }
  ];

  function toIndexKey(file) {
    var context = global.__LOCATOR_CONTEXT_GLOBAL__;
    if (context && file.indexOf(context) === 0) {
      file = file.slice(context.length);
    }
    return file.replace(/^[\\/]/, '');
  }

  function resolveElement(element) {
    for (var i = 0; i < strategies.length; i++) {
      var file = strategies[i].probe(element);
      if (!file) {
        continue;
      }
      var key = toIndexKey(file);
      var index = global.__LOCATOR_INDEX_GLOBAL__ || {};
      var resolved = Object.prototype.hasOwnProperty.call(index, key) ? index[key] : null;
      log('[component-locator]', strategies[i].name, file, '->', key, '->', resolved);
      return resolved;
    }
    return null;
  }

  function findComponentPath(target) {
    var element = target;
    while (element) {
      var resolved = resolveElement(element);
      if (resolved) {
        return resolved;
      }
      element = element.parentElement;
    }
    return null;
  }

  function editorUri(path) {
    switch (EDITOR) {
      case 'vscode':
        return 'vscode://file' + path;
      case 'webstorm':
        return 'webstorm://open?file=' + path.replace(/^[A-Z]:/, '').replace(/\\/g, '/');
      default:
        return null;
    }
  }

  function openInEditor(path) {
    var uri = editorUri(path);
    if (!uri) {
      if (global.console) {
        global.console.warn('[component-locator] Unsupported editor: ' + EDITOR);
      }
      return;
    }
    log('[component-locator] Opening file in ' + EDITOR + ': ' + uri);
    global.location.assign(uri);
  }

  function onClick(event) {
    if (!isTrigger(event)) {
      return;
    }
    event.preventDefault();
    event.stopPropagation();

    var path = findComponentPath(event.target);
    if (path) {
      openInEditor(path);
    } else {
      log('[component-locator] No component path found');
    }
  }

  var controller = {
    listener: null,

    initialize: function () {
      controller.cleanup();
      global.__LOCATOR_INDEX_GLOBAL__ = COMPONENT_INDEX;
      global.__LOCATOR_CONTEXT_GLOBAL__ = PROJECT_CONTEXT;
      if (global.document) {
        controller.listener = onClick;
        global.document.addEventListener('click', controller.listener);
      }
      log('[component-locator] initialized with', Object.keys(COMPONENT_INDEX).length, 'components');
    },

    cleanup: function () {
      if (controller.listener) {
        global.document.removeEventListener('click', controller.listener);
        controller.listener = null;
      }
      delete global.__LOCATOR_INDEX_GLOBAL__;
      delete global.__LOCATOR_CONTEXT_GLOBAL__;
    }
  };

  // A previously loaded copy of this script owns its own listener.
  if (typeof global.__LOCATOR_CLEANUP_GLOBAL__ === 'function') {
    global.__LOCATOR_CLEANUP_GLOBAL__();
  }
  controller.initialize();

  global.__LOCATOR_REINIT_GLOBAL__ = function () {
    controller.initialize();
  };
  global.__LOCATOR_CLEANUP_GLOBAL__ = function () {
    controller.cleanup();
  };

  var originalHotUpdate = global[HOT_UPDATE_GLOBAL];
  if (typeof originalHotUpdate === 'function' && !originalHotUpdate.__componentLocatorWrapped) {
    var wrappedHotUpdate = function () {
      var result = originalHotUpdate.apply(this, arguments);
      global.__LOCATOR_REINIT_GLOBAL__();
      return result;
    };
    wrappedHotUpdate.__componentLocatorWrapped = true;
    global[HOT_UPDATE_GLOBAL] = wrappedHotUpdate;
  }
})(typeof self !== 'undefined' ? self : this);
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
