//! Template sets compiled into the binary.
//!
//! [`all_sets`] returns every set for both languages. Each file is written
//! once: `$S` in a path expands to the script extension (`ts`/`js`), `$C` to
//! the component extension (`tsx`/`js`), and TypeScript-only syntax sits
//! behind `{{#if typescript}}`.
//!
//! # Overrides
//!
//! Sets on disk replace built-in ones with the same name and language. The
//! directories searched, in order:
//!
//! 1. **`$NEXORA_TEMPLATES_DIR`**
//! 2. **`<executable-dir>/templates`**
//!
//! See [`override_dirs`] and [`crate::template_loader`] for the layout.

use std::path::PathBuf;

use tracing::debug;

use nexora_core::domain::{Language, TemplateFile, TemplateSet, WritePolicy};

/// Environment variable naming a directory of override template sets.
pub const TEMPLATES_DIR_ENV: &str = "NEXORA_TEMPLATES_DIR";

// ── Public API ────────────────────────────────────────────────────────────────

/// Every built-in set, for both languages.
pub fn all_sets() -> Vec<TemplateSet> {
    let mut sets = Vec::with_capacity(BUILTIN_SETS.len() * Language::ALL.len());
    for language in Language::ALL {
        for (name, files) in BUILTIN_SETS {
            sets.push(expand(name, files, language));
        }
    }
    sets
}

/// Names of the built-in sets.
pub fn set_names() -> Vec<&'static str> {
    BUILTIN_SETS.iter().map(|(name, _)| *name).collect()
}

/// Existing override directories, in priority order.
pub fn override_dirs() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        let p = PathBuf::from(env_dir);
        debug!(path = %p.display(), env = TEMPLATES_DIR_ENV, "candidate from environment");
        paths.push(p);
    }

    if let Some(exe_sibling) = exe_sibling_templates() {
        debug!(path = %exe_sibling.display(), "candidate from exe sibling");
        paths.push(exe_sibling);
    }

    paths.retain(|p| p.is_dir());
    paths
}

fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}

// ── Table ─────────────────────────────────────────────────────────────────────

struct BuiltinFile {
    path: &'static str,
    content: &'static str,
    policy: WritePolicy,
    only: Option<Language>,
}

const fn file(path: &'static str, content: &'static str) -> BuiltinFile {
    BuiltinFile {
        path,
        content,
        policy: WritePolicy::Always,
        only: None,
    }
}

impl BuiltinFile {
    const fn create_only(self) -> Self {
        Self {
            policy: WritePolicy::CreateOnly,
            ..self
        }
    }

    const fn only(self, language: Language) -> Self {
        Self {
            only: Some(language),
            ..self
        }
    }
}

fn expand(name: &str, files: &[BuiltinFile], language: Language) -> TemplateSet {
    let mut set = TemplateSet::new(name, language);
    for f in files.iter().filter(|f| f.only.is_none_or(|l| l == language)) {
        let path = f
            .path
            .replace("$S", language.script_extension())
            .replace("$C", language.component_extension());
        let mut template = TemplateFile::new(path, f.content);
        if f.policy == WritePolicy::CreateOnly {
            template = template.create_only();
        }
        set.push(template);
    }
    set
}

const BUILTIN_SETS: &[(&str, &[BuiltinFile])] = &[
    ("core", CORE),
    ("screens", SCREENS),
    ("navigation", NAVIGATION),
    ("redux", REDUX),
    ("zustand", ZUSTAND),
    ("styled-components", STYLED_COMPONENTS),
    ("tailwind", TAILWIND),
    ("async-storage", ASYNC_STORAGE),
    ("mmkv", MMKV),
    ("theme", THEME),
    ("localization", LOCALIZATION),
    ("api", API),
    ("firebase", FIREBASE),
    ("auth", AUTH),
];

// ── core ──────────────────────────────────────────────────────────────────────

const CORE: &[BuiltinFile] = &[
    file("package.json", PACKAGE_JSON).create_only(),
    file("app.json", APP_JSON).create_only(),
    file("index.js", INDEX_JS),
    file("babel.config.js", BABEL_CONFIG),
    file("metro.config.js", METRO_CONFIG),
    file(".gitignore", GITIGNORE),
    file("tsconfig.json", TSCONFIG).only(Language::TypeScript),
];

const PACKAGE_JSON: &str = r##"{
  "name": "{{packageName}}",
  "version": "0.0.1",
  "private": true,
  "scripts": {
    "android": "react-native run-android",
    "ios": "react-native run-ios",
    "start": "react-native start",
    "test": "jest",
    "lint": "eslint ."
  },
  "dependencies": {
    "react": "18.2.0",
    "react-native": "0.73.6"
  },
  "devDependencies": {
    "@babel/core": "^7.20.0",
    "@babel/preset-env": "^7.20.0",
    "@babel/runtime": "^7.20.0",
    "@react-native/babel-preset": "0.73.21",
    "@react-native/metro-config": "0.73.5",
{{#if typescript}}
    "@react-native/typescript-config": "0.73.1",
    "@types/react": "^18.2.6",
    "typescript": "5.0.4",
{{/if}}
    "jest": "^29.6.3"
  },
  "engines": {
    "node": ">=18"
  }
}
"##;

const APP_JSON: &str = r##"{
  "name": "{{projectName}}",
  "displayName": "{{projectName}}"
}
"##;

const INDEX_JS: &str = r##"{{#if (contains navigation "drawer")}}
import 'react-native-gesture-handler';
{{/if}}
import { AppRegistry } from 'react-native';
import App from './App';
import { name as appName } from './app.json';

AppRegistry.registerComponent(appName, () => App);
"##;

const BABEL_CONFIG: &str = r##"module.exports = {
  presets: ['module:@react-native/babel-preset'],
{{#if (contains navigation "drawer")}}
  plugins: ['react-native-reanimated/plugin'],
{{/if}}
};
"##;

const METRO_CONFIG: &str = r##"const { getDefaultConfig, mergeConfig } = require('@react-native/metro-config');

const config = {};

module.exports = mergeConfig(getDefaultConfig(__dirname), config);
"##;

const GITIGNORE: &str = r##"# dependencies
node_modules/

# native builds
android/build/
android/app/build/
ios/build/
ios/Pods/
*.xcworkspace/xcuserdata/

# nexora
.nexora-backups/
.nexora.lock

# misc
.DS_Store
*.log
.env
"##;

const TSCONFIG: &str = r##"{
  "extends": "@react-native/typescript-config/tsconfig.json",
  "compilerOptions": {
    "resolveJsonModule": true
  }
}
"##;

// ── screens ───────────────────────────────────────────────────────────────────

const SCREENS: &[BuiltinFile] = &[
    file("src/screens/HomeScreen.$C", HOME_SCREEN),
    file("src/screens/SettingsScreen.$C", SETTINGS_SCREEN),
];

const HOME_SCREEN: &str = r##"import React from 'react';
import { View, Text, StyleSheet{{#if hasNavigation}}, TouchableOpacity{{/if}} } from 'react-native';
{{#if theme}}
import { useTheme } from '../config/theme';
{{/if}}
{{#if localization}}
import { useTranslation } from 'react-i18next';
{{/if}}

const HomeScreen = ({{#if hasNavigation}}{ navigation }{{#if typescript}}: any{{/if}}{{/if}}) => {
{{#if theme}}
  const { colors } = useTheme();
{{/if}}
{{#if localization}}
  const { t } = useTranslation();
{{/if}}

  return (
    <View style={[styles.container{{#if theme}}, { backgroundColor: colors.background }{{/if}}]}>
      <Text style={[styles.title{{#if theme}}, { color: colors.text }{{/if}}]}>
        {{#if localization}}{t('home.title')}{{else}}Welcome to {{projectName}}!{{/if}}
      </Text>
{{#if hasNavigation}}
      <TouchableOpacity style={styles.button} onPress={() => navigation.navigate('Settings')}>
        <Text style={styles.buttonText}>{{#if localization}}{t('home.openSettings')}{{else}}Open settings{{/if}}</Text>
      </TouchableOpacity>
{{/if}}
    </View>
  );
};

const styles = StyleSheet.create({
  container: { flex: 1, alignItems: 'center', justifyContent: 'center', padding: 24 },
  title: { fontSize: 24, fontWeight: '600' },
  button: { marginTop: 24, paddingHorizontal: 20, paddingVertical: 12, borderRadius: 8, backgroundColor: '#3B82F6' },
  buttonText: { color: '#FFFFFF', fontWeight: '600' },
});

export default HomeScreen;
"##;

const SETTINGS_SCREEN: &str = r##"import React from 'react';
import { View, Text, StyleSheet{{#if theme}}, Switch{{/if}}{{#if localization}}, TouchableOpacity{{/if}} } from 'react-native';
{{#if theme}}
import { useTheme } from '../config/theme';
{{/if}}
{{#if localization}}
import { useLocalization } from '../localization';
{{/if}}

const SettingsScreen = () => {
{{#if theme}}
  const { colors, isDark, toggleTheme } = useTheme();
{{/if}}
{{#if localization}}
  const { t, locale, setLocale, availableLanguages } = useLocalization();
{{/if}}

  return (
    <View style={[styles.container{{#if theme}}, { backgroundColor: colors.background }{{/if}}]}>
      <Text style={[styles.title{{#if theme}}, { color: colors.text }{{/if}}]}>
        {{#if localization}}{t('settings.title')}{{else}}Settings{{/if}}
      </Text>
{{#if theme}}
      <View style={styles.row}>
        <Text style={{ color: colors.text }}>{{#if localization}}{t('settings.darkTheme')}{{else}}Dark theme{{/if}}</Text>
        <Switch value={isDark} onValueChange={toggleTheme} />
      </View>
{{/if}}
{{#if localization}}
      <View style={styles.row}>
        {availableLanguages.map(code => (
          <TouchableOpacity key={code} onPress={() => setLocale(code)}>
            <Text style={code === locale ? styles.active : undefined}>{code.toUpperCase()}</Text>
          </TouchableOpacity>
        ))}
      </View>
{{/if}}
    </View>
  );
};

const styles = StyleSheet.create({
  container: { flex: 1, padding: 24 },
  title: { fontSize: 24, fontWeight: '600', marginBottom: 24 },
  row: { flexDirection: 'row', alignItems: 'center', justifyContent: 'space-between', marginBottom: 16 },
  active: { fontWeight: '700', textDecorationLine: 'underline' },
});

export default SettingsScreen;
"##;

// ── navigation ────────────────────────────────────────────────────────────────

const NAVIGATION: &[BuiltinFile] = &[
    file("src/navigation/index.$C", NAVIGATOR),
    file("src/navigation/screens.$C", NAVIGATION_SCREENS),
];

const NAVIGATOR: &str = r##"import React from 'react';
{{#if (contains navigation "drawer")}}
import { createDrawerNavigator } from '@react-navigation/drawer';
{{/if}}
{{#if (contains navigation "tabs")}}
import { createBottomTabNavigator } from '@react-navigation/bottom-tabs';
{{/if}}
{{#if (contains navigation "stack")}}
import { createNativeStackNavigator } from '@react-navigation/native-stack';
{{/if}}
import { HomeScreen, SettingsScreen } from './screens';
{{#if auth}}
import LoginScreen from '../screens/auth/LoginScreen';
import { useAuth } from '../hooks/useAuth';
{{/if}}

{{#if (contains navigation "stack")}}
const Stack = createNativeStackNavigator();

const MainStack = () => (
  <Stack.Navigator>
    <Stack.Screen name="Home" component={HomeScreen} />
    <Stack.Screen name="Settings" component={SettingsScreen} />
  </Stack.Navigator>
);

{{/if}}
{{#if (contains navigation "tabs")}}
const Tab = createBottomTabNavigator();
const TabHome = {{#if (contains navigation "stack")}}MainStack{{else}}HomeScreen{{/if}};

const MainTabs = () => (
  <Tab.Navigator>
    <Tab.Screen name="Main" component={TabHome} options={{ title: 'Home' }} />
    <Tab.Screen name="Settings" component={SettingsScreen} />
  </Tab.Navigator>
);

{{/if}}
{{#if (contains navigation "drawer")}}
const Drawer = createDrawerNavigator();
const DrawerHome = {{#if (contains navigation "tabs")}}MainTabs{{else if (contains navigation "stack")}}MainStack{{else}}HomeScreen{{/if}};

const MainDrawer = () => (
  <Drawer.Navigator>
    <Drawer.Screen name="Main" component={DrawerHome} options={{ title: 'Home' }} />
    <Drawer.Screen name="Settings" component={SettingsScreen} />
  </Drawer.Navigator>
);

{{/if}}
const AppNavigator = () => {
{{#if auth}}
  const { user } = useAuth();
  if (!user) {
    return <LoginScreen />;
  }

{{/if}}
  return <{{#if (contains navigation "drawer")}}MainDrawer{{else if (contains navigation "tabs")}}MainTabs{{else}}MainStack{{/if}} />;
};

export default AppNavigator;
"##;

const NAVIGATION_SCREENS: &str = r##"{{#if sampleScreens}}
export { default as HomeScreen } from '../screens/HomeScreen';
export { default as SettingsScreen } from '../screens/SettingsScreen';
{{else}}
import React from 'react';
import { Text, View } from 'react-native';

const Placeholder = ({ title }{{#if typescript}}: { title: string }{{/if}}) => (
  <View style={{ flex: 1, alignItems: 'center', justifyContent: 'center' }}>
    <Text>{title}</Text>
  </View>
);

export const HomeScreen = () => <Placeholder title="{{projectName}}" />;
export const SettingsScreen = () => <Placeholder title="Settings" />;
{{/if}}
"##;

// ── state ─────────────────────────────────────────────────────────────────────

const REDUX: &[BuiltinFile] = &[
    file("src/store/index.$S", REDUX_STORE),
    file("src/store/slices/appSlice.$S", REDUX_SLICE),
];

const REDUX_STORE: &str = r##"import { configureStore } from '@reduxjs/toolkit';
import appReducer from './slices/appSlice';

export const store = configureStore({
  reducer: {
    app: appReducer,
  },
});
{{#if typescript}}

export type RootState = ReturnType<typeof store.getState>;
export type AppDispatch = typeof store.dispatch;
{{/if}}
"##;

const REDUX_SLICE: &str = r##"import { createSlice{{#if typescript}}, PayloadAction{{/if}} } from '@reduxjs/toolkit';
{{#if typescript}}

interface AppState {
  isLoading: boolean;
  isConnected: boolean;
}
{{/if}}

const initialState{{#if typescript}}: AppState{{/if}} = {
  isLoading: false,
  isConnected: true,
};

const appSlice = createSlice({
  name: 'app',
  initialState,
  reducers: {
    setLoading: (state, action{{#if typescript}}: PayloadAction<boolean>{{/if}}) => {
      state.isLoading = action.payload;
    },
    setNetworkStatus: (state, action{{#if typescript}}: PayloadAction<boolean>{{/if}}) => {
      state.isConnected = action.payload;
    },
  },
});

export const { setLoading, setNetworkStatus } = appSlice.actions;
export default appSlice.reducer;
"##;

const ZUSTAND: &[BuiltinFile] = &[
    file("src/store/index.$S", ZUSTAND_INDEX),
    file("src/store/appStore.$S", ZUSTAND_STORE),
];

const ZUSTAND_INDEX: &str = r##"export { useAppStore } from './appStore';
"##;

const ZUSTAND_STORE: &str = r##"import { create } from 'zustand';
{{#if typescript}}

interface AppState {
  isLoading: boolean;
  setLoading: (value: boolean) => void;
}
{{/if}}

export const useAppStore = create{{#if typescript}}<AppState>(){{/if}}((set) => ({
  isLoading: false,
  setLoading: (value) => set({ isLoading: value }),
}));
"##;

// ── ui ────────────────────────────────────────────────────────────────────────

const STYLED_COMPONENTS: &[BuiltinFile] = &[
    file("src/components/Button.$C", STYLED_BUTTON),
    file("src/components/Container.$C", STYLED_CONTAINER),
];

const STYLED_BUTTON: &str = r##"import React from 'react';
import styled from 'styled-components/native';

const Touchable = styled.TouchableOpacity`
  padding: 12px 20px;
  border-radius: 8px;
  background-color: #3b82f6;
  align-items: center;
`;

const Label = styled.Text`
  color: #ffffff;
  font-weight: 600;
`;
{{#if typescript}}

interface ButtonProps {
  title: string;
  onPress: () => void;
}
{{/if}}

const Button = ({ title, onPress }{{#if typescript}}: ButtonProps{{/if}}) => (
  <Touchable onPress={onPress}>
    <Label>{title}</Label>
  </Touchable>
);

export default Button;
"##;

const STYLED_CONTAINER: &str = r##"import styled from 'styled-components/native';

const Container = styled.View`
  flex: 1;
  padding: 16px;
`;

export default Container;
"##;

const TAILWIND: &[BuiltinFile] = &[
    file("src/components/Button.$C", TAILWIND_BUTTON),
    file("src/components/Container.$C", TAILWIND_CONTAINER),
    file("tailwind.config.js", TAILWIND_CONFIG),
];

const TAILWIND_BUTTON: &str = r##"import React from 'react';
import { Text, TouchableOpacity } from 'react-native';
import { useTailwind } from 'tailwind-rn';
{{#if typescript}}

interface ButtonProps {
  title: string;
  onPress: () => void;
}
{{/if}}

const Button = ({ title, onPress }{{#if typescript}}: ButtonProps{{/if}}) => {
  const tailwind = useTailwind();
  return (
    <TouchableOpacity style={tailwind('px-5 py-3 rounded-lg bg-blue-500 items-center')} onPress={onPress}>
      <Text style={tailwind('text-white font-semibold')}>{title}</Text>
    </TouchableOpacity>
  );
};

export default Button;
"##;

const TAILWIND_CONTAINER: &str = r##"import React from 'react';
import { View } from 'react-native';
import { useTailwind } from 'tailwind-rn';

const Container = ({ children }{{#if typescript}}: { children: React.ReactNode }{{/if}}) => {
  const tailwind = useTailwind();
  return <View style={tailwind('flex-1 p-4')}>{children}</View>;
};

export default Container;
"##;

const TAILWIND_CONFIG: &str = r##"module.exports = {
  content: ['./App.{js,jsx,ts,tsx}', './src/**/*.{js,jsx,ts,tsx}'],
  theme: {
    extend: {},
  },
  plugins: [],
};
"##;

// ── storage ───────────────────────────────────────────────────────────────────

const ASYNC_STORAGE: &[BuiltinFile] = &[file("src/utils/storage.$S", ASYNC_STORAGE_UTIL)];

const ASYNC_STORAGE_UTIL: &str = r##"import AsyncStorage from '@react-native-async-storage/async-storage';

export const storage = {
  getItem: (key{{#if typescript}}: string{{/if}}) => AsyncStorage.getItem(key),
  setItem: (key{{#if typescript}}: string{{/if}}, value{{#if typescript}}: string{{/if}}) => AsyncStorage.setItem(key, value),
  removeItem: (key{{#if typescript}}: string{{/if}}) => AsyncStorage.removeItem(key),
};
"##;

const MMKV: &[BuiltinFile] = &[file("src/utils/storage.$S", MMKV_UTIL)];

const MMKV_UTIL: &str = r##"import { MMKV } from 'react-native-mmkv';

export const mmkv = new MMKV();

export const storage = {
  getItem: async (key{{#if typescript}}: string{{/if}}) => mmkv.getString(key) ?? null,
  setItem: async (key{{#if typescript}}: string{{/if}}, value{{#if typescript}}: string{{/if}}) => mmkv.set(key, value),
  removeItem: async (key{{#if typescript}}: string{{/if}}) => mmkv.delete(key),
};
"##;

// ── theme ─────────────────────────────────────────────────────────────────────

const THEME: &[BuiltinFile] = &[
    file("src/config/theme/index.$C", THEME_PROVIDER),
    file("src/config/theme/themes.$S", THEME_COLORS),
];

const THEME_PROVIDER: &str = r##"import React, { createContext, useContext, useEffect, useState } from 'react';
import { useColorScheme } from 'react-native';
import { storage } from '../../utils/storage';
import { darkTheme, lightTheme{{#if typescript}}, ThemeColors{{/if}} } from './themes';
{{#if typescript}}

type ThemeMode = 'light' | 'dark' | 'system';

interface ThemeContextValue {
  mode: ThemeMode;
  isDark: boolean;
  colors: ThemeColors;
  setTheme: (mode: ThemeMode) => void;
  toggleTheme: () => void;
}
{{/if}}

const THEME_STORAGE_KEY = '@theme_mode';
const DEFAULT_MODE{{#if typescript}}: ThemeMode{{/if}} = '{{defaultTheme}}';

const ThemeContext = createContext{{#if typescript}}<ThemeContextValue>{{/if}}({
  mode: DEFAULT_MODE,
  isDark: false,
  colors: lightTheme,
  setTheme: () => {},
  toggleTheme: () => {},
});

export const ThemeProvider = ({ children }{{#if typescript}}: { children: React.ReactNode }{{/if}}) => {
  const system = useColorScheme();
  const [mode, setMode] = useState{{#if typescript}}<ThemeMode>{{/if}}(DEFAULT_MODE);

  useEffect(() => {
    storage.getItem(THEME_STORAGE_KEY).then(saved => {
      if (saved === 'light' || saved === 'dark' || saved === 'system') {
        setMode(saved);
      }
    });
  }, []);

  const isDark = mode === 'system' ? system === 'dark' : mode === 'dark';

  const setTheme = (next{{#if typescript}}: ThemeMode{{/if}}) => {
    setMode(next);
    storage.setItem(THEME_STORAGE_KEY, next);
  };

  const toggleTheme = () => setTheme(isDark ? 'light' : 'dark');

  return (
    <ThemeContext.Provider value={{ mode, isDark, colors: isDark ? darkTheme : lightTheme, setTheme, toggleTheme }}>
      {children}
    </ThemeContext.Provider>
  );
};

export const useTheme = () => useContext(ThemeContext);
"##;

const THEME_COLORS: &str = r##"{{#if typescript}}
export interface ThemeColors {
  primary: string;
  background: string;
  card: string;
  text: string;
  border: string;
}

{{/if}}
export const lightTheme{{#if typescript}}: ThemeColors{{/if}} = {
  primary: '#3B82F6',
  background: '#FFFFFF',
  card: '#F3F4F6',
  text: '#111827',
  border: '#E5E7EB',
};

export const darkTheme{{#if typescript}}: ThemeColors{{/if}} = {
  primary: '#60A5FA',
  background: '#111827',
  card: '#1F2937',
  text: '#F9FAFB',
  border: '#374151',
};
"##;

// ── localization ──────────────────────────────────────────────────────────────

const LOCALIZATION: &[BuiltinFile] = &[
    file("src/localization/index.$C", LOCALIZATION_PROVIDER),
    file("src/localization/translations/en.json", TRANSLATIONS_EN),
    file("src/localization/translations/es.json", TRANSLATIONS_ES),
];

const LOCALIZATION_PROVIDER: &str = r##"import React, { createContext, useContext, useEffect, useState } from 'react';
import i18n from 'i18next';
import { initReactI18next, useTranslation } from 'react-i18next';
import { storage } from '../utils/storage';
import en from './translations/en.json';
import es from './translations/es.json';

const LANGUAGE_STORAGE_KEY = '@app_language';
const DEFAULT_LANGUAGE = '{{defaultLanguage}}';
const availableLanguages = ['en', 'es'];

i18n.use(initReactI18next).init({
  resources: {
    en: { translation: en },
    es: { translation: es },
  },
  lng: DEFAULT_LANGUAGE,
  fallbackLng: 'en',
  interpolation: { escapeValue: false },
});
{{#if typescript}}

interface LocalizationContextValue {
  t: (key: string) => string;
  locale: string;
  setLocale: (code: string) => void;
  availableLanguages: string[];
}
{{/if}}

const LocalizationContext = createContext{{#if typescript}}<LocalizationContextValue>{{/if}}({
  t: (key{{#if typescript}}: string{{/if}}) => key,
  locale: DEFAULT_LANGUAGE,
  setLocale: () => {},
  availableLanguages,
});

export const LocalizationProvider = ({ children }{{#if typescript}}: { children: React.ReactNode }{{/if}}) => {
  const { t } = useTranslation();
  const [locale, setLocaleState] = useState(DEFAULT_LANGUAGE);

  useEffect(() => {
    storage.getItem(LANGUAGE_STORAGE_KEY).then(saved => {
      if (saved && availableLanguages.includes(saved)) {
        i18n.changeLanguage(saved);
        setLocaleState(saved);
      }
    });
  }, []);

  const setLocale = (code{{#if typescript}}: string{{/if}}) => {
    i18n.changeLanguage(code);
    setLocaleState(code);
    storage.setItem(LANGUAGE_STORAGE_KEY, code);
  };

  return (
    <LocalizationContext.Provider value={{ t, locale, setLocale, availableLanguages }}>
      {children}
    </LocalizationContext.Provider>
  );
};

export const useLocalization = () => useContext(LocalizationContext);
export { i18n, useTranslation };
"##;

const TRANSLATIONS_EN: &str = r##"{
  "home": {
    "title": "Welcome to {{projectName}}!",
    "openSettings": "Open settings"
  },
  "settings": {
    "title": "Settings",
    "darkTheme": "Dark theme"
  },
  "auth": {
    "signIn": "Sign in",
    "email": "Email",
    "password": "Password"
  }
}
"##;

const TRANSLATIONS_ES: &str = r##"{
  "home": {
    "title": "¡Bienvenido a {{projectName}}!",
    "openSettings": "Abrir ajustes"
  },
  "settings": {
    "title": "Ajustes",
    "darkTheme": "Tema oscuro"
  },
  "auth": {
    "signIn": "Iniciar sesión",
    "email": "Correo electrónico",
    "password": "Contraseña"
  }
}
"##;

// ── services ──────────────────────────────────────────────────────────────────

const API: &[BuiltinFile] = &[file("src/services/api/index.$S", API_CLIENT)];

const API_CLIENT: &str = r##"import axios from 'axios';

export const API_BASE_URL = 'https://api.example.com';

export const api = axios.create({
  baseURL: API_BASE_URL,
  timeout: 10000,
  headers: { 'Content-Type': 'application/json' },
});

api.interceptors.response.use(
  response => response,
  error => {
    console.warn('[api]', error?.message);
    return Promise.reject(error);
  },
);
"##;

const FIREBASE: &[BuiltinFile] = &[
    file("src/services/firebase/index.$S", FIREBASE_SERVICES),
    file("src/config/firebase.$S", FIREBASE_CONFIG),
];

const FIREBASE_SERVICES: &str = r##"import auth from '@react-native-firebase/auth';
import firestore from '@react-native-firebase/firestore';
import storage from '@react-native-firebase/storage';
import messaging from '@react-native-firebase/messaging';
import crashlytics from '@react-native-firebase/crashlytics';
import analytics from '@react-native-firebase/analytics';

export { auth, firestore, storage, messaging, crashlytics, analytics };

export const logEvent = (name{{#if typescript}}: string{{/if}}, params{{#if typescript}}?: Record<string, unknown>{{/if}}) =>
  analytics().logEvent(name, params);
"##;

const FIREBASE_CONFIG: &str = r##"import firebase from '@react-native-firebase/app';

// Native configuration lives in google-services.json and GoogleService-Info.plist.
export const isFirebaseReady = () => firebase.apps.length > 0;
"##;

const AUTH: &[BuiltinFile] = &[
    file("src/screens/auth/LoginScreen.$C", LOGIN_SCREEN),
    file("src/hooks/useAuth.$S", USE_AUTH),
];

const LOGIN_SCREEN: &str = r##"import React, { useState } from 'react';
import { Button, StyleSheet, Text, TextInput, View } from 'react-native';
import { useAuth } from '../../hooks/useAuth';
{{#unless firebase}}

const requestToken = async (email{{#if typescript}}: string{{/if}}, password{{#if typescript}}: string{{/if}}) => {
  throw new Error('Connect requestToken to your backend');
};
{{/unless}}

const LoginScreen = () => {
  const { signIn } = useAuth();
  const [email, setEmail] = useState('');
  const [password, setPassword] = useState('');
  const [error, setError] = useState{{#if typescript}}<string | null>{{/if}}(null);

  const submit = async () => {
    try {
{{#if firebase}}
      await signIn(email, password);
{{else}}
      await signIn(await requestToken(email, password));
{{/if}}
    } catch (e) {
      setError(String(e));
    }
  };

  return (
    <View style={styles.container}>
      <Text style={styles.title}>{{projectName}}</Text>
      <TextInput style={styles.input} placeholder="Email" autoCapitalize="none" value={email} onChangeText={setEmail} />
      <TextInput style={styles.input} placeholder="Password" secureTextEntry value={password} onChangeText={setPassword} />
      {error ? <Text style={styles.error}>{error}</Text> : null}
      <Button title="Sign in" onPress={submit} />
    </View>
  );
};

const styles = StyleSheet.create({
  container: { flex: 1, justifyContent: 'center', padding: 24 },
  title: { fontSize: 28, fontWeight: '700', marginBottom: 32, textAlign: 'center' },
  input: { borderWidth: 1, borderColor: '#D1D5DB', borderRadius: 8, padding: 12, marginBottom: 12 },
  error: { color: '#DC2626', marginBottom: 12 },
});

export default LoginScreen;
"##;

const USE_AUTH: &str = r##"import { useEffect, useState } from 'react';
{{#if firebase}}
import auth{{#if typescript}}, { FirebaseAuthTypes }{{/if}} from '@react-native-firebase/auth';
{{else}}
import { jwtDecode } from 'jwt-decode';
import { storage } from '../utils/storage';

const TOKEN_KEY = '@auth_token';
{{/if}}

export const useAuth = () => {
{{#if firebase}}
  const [user, setUser] = useState{{#if typescript}}<FirebaseAuthTypes.User | null>{{/if}}(null);

  useEffect(() => auth().onAuthStateChanged(setUser), []);

  const signIn = (email{{#if typescript}}: string{{/if}}, password{{#if typescript}}: string{{/if}}) =>
    auth().signInWithEmailAndPassword(email, password);
  const signOut = () => auth().signOut();
{{else}}
  const [user, setUser] = useState{{#if typescript}}<unknown>{{/if}}(null);

  useEffect(() => {
    storage.getItem(TOKEN_KEY).then(token => {
      if (token) {
        setUser(jwtDecode(token));
      }
    });
  }, []);

  const signIn = async (token{{#if typescript}}: string{{/if}}) => {
    await storage.setItem(TOKEN_KEY, token);
    setUser(jwtDecode(token));
  };
  const signOut = async () => {
    await storage.removeItem(TOKEN_KEY);
    setUser(null);
  };
{{/if}}

  return { user, signIn, signOut };
};
"##;
